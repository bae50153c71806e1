#![doc = include_str!("../README.md")]

mod arena;
mod error;
mod expr;
mod keywords;
mod lexeme;
mod lexer;
mod limit;
mod node;
mod parser;
mod precedence;
mod scope;
mod token;

pub use crate::arena::NodeArena;
pub use crate::error::SyntaxError;
pub use crate::lexeme::{Lexeme, LexemeKind};
pub use crate::lexer::{lex, Location};
pub use crate::limit::LimitTracker;
pub use crate::node::{children, NodeId, NodeKind, ParseNode};
pub use crate::parser::{Parser, SyntaxTree};
pub use crate::token::{tokenize, Token};
