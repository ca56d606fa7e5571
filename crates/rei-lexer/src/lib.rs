//! rei-lexer - Lexer/Tokenizer for the Rei configuration language
//!
//! This crate turns Rei source text into a stream of tokens for a parser.
//!
//! # Features
//!
//! - Pull API with one token of lookahead
//! - Line tracking across `\n`, `\r`, `\r\n` and `\n\r` breaks
//! - Lexemes borrowed from the source buffer
//! - Errors that convert into `rei_error::Diagnostic`s
//!
//! # Example
//!
//! ```rust
//! use rei_lexer::{Lexer, TokenKind};
//!
//! let source = "$(name=\"value\")\n$print(name)";
//!
//! let mut lexer = Lexer::new(source, 0);
//! lexer.expect(TokenKind::VerPrefix).unwrap();
//! lexer.expect(TokenKind::LeftParen).unwrap();
//! assert_eq!(lexer.look_ahead().unwrap(), TokenKind::Name);
//!
//! let name = lexer.next_token().unwrap();
//! assert_eq!(name.lexeme, "name");
//! ```

pub mod error;
pub mod lexer;
pub mod token;

pub use error::LexError;
pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
