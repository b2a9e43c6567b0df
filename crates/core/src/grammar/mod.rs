/// Commu tree types: groups and their properties.
pub mod ast;
/// Anchored cursor the parser drives over a line.
pub mod cursor;
/// JSON serialization helpers for the tree.
pub mod dump;
/// Commu emitter — renders a tree back into a line.
pub mod emit;
/// Commu parser — recursive descent over a [`cursor::Cursor`].
pub mod parser;
