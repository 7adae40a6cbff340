//! Mock generation for Go interfaces.
//!
//! Given Go source declaring interfaces, rsmock emits a companion file
//! defining, per interface, a struct with one function-valued field per
//! method and wrapper methods that forward calls to those fields — or
//! panic when a field was never assigned.

pub mod generator;
pub mod model;
pub mod render;
pub mod typestr;
pub mod version;

pub use generator::Generator;

use thiserror::Error as ThisError;

/// Fatal conditions of a generation run. Nothing here is retried: every
/// error aborts the whole run.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Malformed input source.
    #[error("parsing {name}: {failure}")]
    Parse {
        name: String,
        failure: goparse::error::ParseFailure,
    },

    /// A type-expression kind the serializer does not model. This is a
    /// tool-capability gap, not a user error.
    #[error("unsupported type expression: {kind}")]
    UnsupportedType { kind: &'static str },

    #[error("{dir}: no buildable Go files")]
    NoGoFiles { dir: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("rendering mock template: {0}")]
    Template(#[from] tera::Error),
}

/// Snake-case base name derived from a type name; drives the output
/// file name (`UserRepository` becomes `user_repository`).
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.char_indices() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::snake_case;

    #[test]
    fn snake_case_splits_camel_humps() {
        assert_eq!(snake_case("UserRepository"), "user_repository");
        assert_eq!(snake_case("Store"), "store");
        assert_eq!(snake_case("v2Codec"), "v2_codec");
    }
}
