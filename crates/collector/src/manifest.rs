use k8s_openapi::api::batch::v1::Job;
use serde::Deserialize;

use crate::Result;

/// Parses a YAML (or JSON) stream holding one or more Job manifests.
///
/// Each document yields its own result so that one malformed manifest does
/// not hide the others. Empty documents are skipped.
pub fn parse_jobs(input: &str) -> Vec<Result<Job>> {
    serde_yaml::Deserializer::from_str(input)
        .filter_map(|document| match serde_yaml::Value::deserialize(document) {
            Ok(serde_yaml::Value::Null) => None,
            Ok(value) => Some(serde_yaml::from_value::<Job>(value).map_err(Into::into)),
            Err(e) => Some(Err(e.into())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_JOBS: &str = r#"
apiVersion: batch/v1
kind: Job
metadata:
  name: first
  namespace: default
spec:
  completions: 1
  parallelism: 1
  template: {}
---
apiVersion: batch/v1
kind: Job
metadata:
  name: second
  namespace: default
spec:
  template: {}
---
"#;

    #[test]
    fn test_parse_multiple_documents() {
        let jobs = parse_jobs(TWO_JOBS);
        assert_eq!(jobs.len(), 2);

        let names: Vec<_> = jobs
            .iter()
            .map(|job| job.as_ref().unwrap().metadata.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_parse_json_document() {
        let jobs = parse_jobs(
            r#"{"apiVersion":"batch/v1","kind":"Job","metadata":{"name":"j","uid":"u1"},"spec":{"template":{}}}"#,
        );
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].as_ref().unwrap().metadata.uid.as_deref(), Some("u1"));
    }

    #[test]
    fn test_bad_document_does_not_hide_others() {
        let input = "apiVersion: batch/v1\nkind: Job\nmetadata: [not, a, map]\n---\napiVersion: batch/v1\nkind: Job\nmetadata:\n  name: ok\n";
        let jobs = parse_jobs(input);

        assert_eq!(jobs.len(), 2);
        assert!(jobs[0].is_err());
        assert!(jobs[1].is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_jobs("").is_empty());
    }
}
