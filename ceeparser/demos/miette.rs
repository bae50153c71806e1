//! Shows how to render `ceeparser`'s errors with the `miette` diagnostic
//! library: each `SyntaxError` carries enough (message, offending text,
//! byte offset) to build a `SourceSpan` and get a terminal-friendly report.

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use ceeparser::Parser;

#[derive(Error, Debug, Diagnostic)]
#[error("{}", self.ty)]
#[diagnostic(code("ceeparser parsing error."))]
struct CeeparserError {
    ty: String,
    #[source_code]
    src: NamedSource,
    #[label("{}", self.ty)]
    span: SourceSpan,
}

fn parse_and_report(name: &str, src: &str) {
    let tree = Parser::new(src).parse();
    for err in tree.errors() {
        let report = Report::new(CeeparserError {
            src: NamedSource::new(name, src.to_string()),
            span: (err.index(), err.data().len().max(1)).into(),
            ty: err.message().into(),
        });
        println!("{report:?}");
    }
}

fn main() {
    parse_and_report("missing_semicolon.c", "int x = 1\nint y = 2;\n");
}
