//! Test fixtures for creating sample manifest streams
//!
//! Each fixture is a complete input stream as a user would pipe it into
//! kujo. The same configuration objects are reused across fixtures so that
//! expected suffixes can be compared between them.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const PERL_JOB_CONFIG: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: perl-job-config
data:
  digits: "2000"
"#;

const MY_SECRET: &str = r#"apiVersion: v1
kind: Secret
metadata:
  name: mysecret
type: Opaque
data:
  username: YWRtaW4=
"#;

const PI_JOB: &str = r#"apiVersion: batch/v1
kind: Job
metadata:
  name: pi
  annotations:
    kujo.sphc.io: "true"
spec:
  backoffLimit: 4
  template:
    spec:
      restartPolicy: Never
      containers:
        - name: pi
          image: perl
          command: ["perl", "-Mbignum=bpi", "-wle", "print bpi(2000)"]
          envFrom:
            - secretRef:
                name: mysecret
      volumes:
        - name: config
          configMap:
            name: perl-job-config
"#;

const DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  replicas: 1
"#;

fn stream(documents: &[&str]) -> String {
    documents.join("---\n")
}

/// Test fixture for creating sample manifest streams
#[derive(Clone, Debug)]
pub struct ManifestFixture {
    pub content: String,
    pub name: String,
}

impl ManifestFixture {
    /// ConfigMap, Secret and an opted-in Job referencing both, plus a
    /// Deployment that is dropped by the filter.
    pub fn full_config() -> Self {
        Self {
            name: "full_config".to_string(),
            content: stream(&[PERL_JOB_CONFIG, MY_SECRET, PI_JOB, DEPLOYMENT]),
        }
    }

    /// The opted-in Job on its own, without the objects it references.
    pub fn job_only() -> Self {
        Self {
            name: "job_only".to_string(),
            content: PI_JOB.to_string(),
        }
    }

    /// The Job and the ConfigMap, but not the Secret.
    pub fn job_configmap() -> Self {
        Self {
            name: "job_configmap".to_string(),
            content: stream(&[PERL_JOB_CONFIG, PI_JOB]),
        }
    }

    /// The Job and the Secret, but not the ConfigMap.
    pub fn job_secret() -> Self {
        Self {
            name: "job_secret".to_string(),
            content: stream(&[PI_JOB, MY_SECRET]),
        }
    }

    /// ConfigMap and Secret without any Job.
    pub fn config_only() -> Self {
        Self {
            name: "config_only".to_string(),
            content: stream(&[PERL_JOB_CONFIG, MY_SECRET]),
        }
    }

    /// An input stream with no documents.
    pub fn no_config() -> Self {
        Self {
            name: "no_config".to_string(),
            content: String::new(),
        }
    }

    /// The full configuration with the Job's annotation removed.
    pub fn unannotated_job() -> Self {
        Self {
            name: "unannotated_job".to_string(),
            content: stream(&[
                PERL_JOB_CONFIG,
                MY_SECRET,
                &PI_JOB.replace("  annotations:\n    kujo.sphc.io: \"true\"\n", ""),
            ]),
        }
    }

    /// The full configuration with a non-boolean annotation value.
    pub fn invalid_annotation() -> Self {
        Self {
            name: "invalid_annotation".to_string(),
            content: stream(&[
                PERL_JOB_CONFIG,
                MY_SECRET,
                &PI_JOB.replace("kujo.sphc.io: \"true\"", "kujo.sphc.io: \"please\""),
            ]),
        }
    }

    /// Recognized kinds at API versions kujo doesn't accept.
    pub fn wrong_versions() -> Self {
        Self {
            name: "wrong_versions".to_string(),
            content: stream(&[
                &PERL_JOB_CONFIG.replace("apiVersion: v1", "apiVersion: v2"),
                &PI_JOB.replace("apiVersion: batch/v1", "apiVersion: batch/v1beta1"),
            ]),
        }
    }

    /// A stream whose second document is malformed YAML.
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: stream(&[PERL_JOB_CONFIG, "kind: [Job\nmetadata: {name: broken\n"]),
        }
    }

    /// Write the fixture into `dir`, returning the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.yaml", self.name));
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}
