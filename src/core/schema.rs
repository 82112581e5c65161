// src/core/schema.rs

use crate::{
    constants::GITHUB_API_BASE,
    core::{github_release::GithubRelease, local_file::LocalFile, operation::Operation},
    error::CommandError,
    system::http::HttpClient,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::rc::Rc;

lazy_static! {
    static ref SCHEMA_RE: Regex = Regex::new(r"^(\w+:)").unwrap();
}

/// Maps a reference schema to the constructor of the operation that handles it.
struct SchemaDefinition {
    schema: &'static str,
    constructor: fn(Rc<dyn HttpClient>) -> Box<dyn Operation>,
}

/// Every supported schema. To support a new source, add an entry here.
static SCHEMA_REGISTRY: &[SchemaDefinition] = &[
    SchemaDefinition {
        schema: LocalFile::SCHEMA,
        constructor: new_local_file,
    },
    SchemaDefinition {
        schema: GithubRelease::SCHEMA,
        constructor: new_github_release,
    },
];

fn new_local_file(_http: Rc<dyn HttpClient>) -> Box<dyn Operation> {
    Box::new(LocalFile)
}

fn new_github_release(http: Rc<dyn HttpClient>) -> Box<dyn Operation> {
    Box::new(GithubRelease::new(http, GITHUB_API_BASE))
}

/// Returns the schema prefix of `reference`, trailing colon included.
pub fn schema_of(reference: &str) -> Result<&str, CommandError> {
    SCHEMA_RE
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| CommandError::InvalidReferenceFormat {
            reference: reference.to_string(),
            reason: "expected 'github:' or 'file:' schema.",
        })
}

/// Builds the operation responsible for `reference`. Operations that fetch
/// over the network use `http`.
pub fn create(
    reference: &str,
    http: Rc<dyn HttpClient>,
) -> Result<Box<dyn Operation>, CommandError> {
    let schema = schema_of(reference)?;
    let definition = SCHEMA_REGISTRY
        .iter()
        .find(|def| def.schema == schema)
        .ok_or_else(|| CommandError::UnknownSchema(reference.to_string()))?;
    let operation = (definition.constructor)(http);
    log::debug!(
        "Reference '{}' handled by schema '{}'",
        reference,
        operation.schema()
    );
    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHttp;

    fn create(reference: &str) -> Result<Box<dyn Operation>, CommandError> {
        super::create(reference, Rc::new(FakeHttp::default()))
    }

    #[test]
    fn test_create_dispatches_on_schema() {
        assert_eq!(create("file:./a.zip").unwrap().schema(), "file:");
        assert_eq!(create("github:kwatch/hello-ruby").unwrap().schema(), "github:");
    }

    #[test]
    fn test_reference_without_schema() {
        let err = create("kwatch/hello-ruby").err().unwrap();
        assert!(matches!(err, CommandError::InvalidReferenceFormat { .. }));
        assert_eq!(
            err.to_string(),
            "kwatch/hello-ruby: expected 'github:' or 'file:' schema."
        );
    }

    #[test]
    fn test_unregistered_schema() {
        let err = create("gh:kwatch/hello-ruby").err().unwrap();
        assert!(matches!(err, CommandError::UnknownSchema(ref r) if r == "gh:kwatch/hello-ruby"));
    }

    #[test]
    fn test_schema_of_takes_only_the_leading_token() {
        assert_eq!(schema_of("file:C:/dl/a.zip").unwrap(), "file:");
        assert!(schema_of(":nothing").is_err());
    }

    #[test]
    fn test_registry_schemas_match_variants() {
        for def in SCHEMA_REGISTRY {
            assert_eq!((def.constructor)(Rc::new(FakeHttp::default())).schema(), def.schema);
        }
    }
}
