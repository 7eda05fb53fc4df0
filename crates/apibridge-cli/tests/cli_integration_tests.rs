//! Integration tests for the apibridge binary.
//!
//! Covers exit codes and outputs of generate, check and registry.

#![allow(non_snake_case)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const V1BETA1: &str = r#"
use crate::schema::meta::ObjectMeta;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(flatten)]
    pub object_meta: ObjectMeta,
    pub spec: RouteSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub traffic: Vec<TrafficTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficTarget {
    pub tag: Option<String>,
    pub revision_name: Option<String>,
    pub percent: i64,
}
"#;

const V1ALPHA1: &str = r#"
use crate::schema::meta::ObjectMeta;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(flatten)]
    pub object_meta: ObjectMeta,
    pub spec: RouteSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub traffic: Vec<TrafficTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficTarget {
    pub revision_name: Option<String>,
    pub tag: Option<String>,
    pub percent: i64,
}
"#;

const META: &str = r#"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    pub generation: i64,
}
"#;

const CONFIG: &str = r#"
interface_api = "v1beta1"

[[sources]]
package = "crate::schema::meta"
path = "src/schema/meta.rs"

[[sources]]
package = "crate::schema::v1beta1"
path = "src/schema/v1beta1.rs"

[[sources]]
package = "crate::schema::v1alpha1"
path = "src/schema/v1alpha1.rs"

[api.v1beta1]
package = "crate::schema::v1beta1"
roots = ["Route"]

[api.v1beta1.slice_keys]
TrafficTarget = ["tag", "revision_name"]

[api.v1alpha1]
package = "crate::schema::v1alpha1"
roots = ["Route"]

[api.v1alpha1.slice_keys]
TrafficTarget = ["tag", "revision_name"]
"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("src/schema");
    fs::create_dir_all(&schema).unwrap();
    fs::write(schema.join("meta.rs"), META).unwrap();
    fs::write(schema.join("v1beta1.rs"), V1BETA1).unwrap();
    fs::write(schema.join("v1alpha1.rs"), V1BETA1).unwrap();
    fs::write(dir.path().join("apibridge.toml"), CONFIG).unwrap();
    dir
}

fn apibridge(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_apibridge"))
        .current_dir(dir)
        .env_remove("APIBRIDGE_LOG")
        .args(args)
        .output()
        .unwrap()
}

mod generate {
    use super::*;

    #[test]
    fn generate___interface_then_implementation___both_succeed() {
        let dir = project();

        let iface = apibridge(
            dir.path(),
            &["generate", "--api", "v1beta1", "--interface", "-o", "gen/generic.rs", "--my-package", "crate::generic"],
        );
        let adapters = apibridge(
            dir.path(),
            &[
                "generate",
                "--api",
                "v1alpha1",
                "-o",
                "gen/v1alpha1.rs",
                "--my-package",
                "crate::adapters::v1alpha1",
                "--interface-package",
                "crate::generic",
            ],
        );

        assert!(iface.status.success(), "{}", String::from_utf8_lossy(&iface.stderr));
        assert!(adapters.status.success(), "{}", String::from_utf8_lossy(&adapters.stderr));
        let out = fs::read_to_string(dir.path().join("gen/v1alpha1.rs")).unwrap();
        assert!(out.contains("// Code generated by apibridge generate --api v1alpha1"));
        assert!(out.contains("impl generic::TrafficTargetSlice for V1alpha1TrafficTargetSlice<'_> {"));
    }

    #[test]
    fn generate___field_order_differs___still_conforms() {
        let dir = project();
        fs::write(dir.path().join("src/schema/v1alpha1.rs"), V1ALPHA1).unwrap();

        let output = apibridge(
            dir.path(),
            &[
                "generate",
                "--api",
                "v1alpha1",
                "-o",
                "v1alpha1.rs",
                "--my-package",
                "crate::adapters::v1alpha1",
                "--interface-package",
                "crate::generic",
            ],
        );

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    }

    #[test]
    fn generate___key_sets_differ___fails_conformance() {
        let dir = project();
        let config = CONFIG.replace(
            "[api.v1alpha1.slice_keys]\nTrafficTarget = [\"tag\", \"revision_name\"]",
            "[api.v1alpha1.slice_keys]\nTrafficTarget = [\"revision_name\"]",
        );
        fs::write(dir.path().join("apibridge.toml"), config).unwrap();

        let output = apibridge(
            dir.path(),
            &[
                "generate",
                "--api",
                "v1alpha1",
                "-o",
                "v1alpha1.rs",
                "--my-package",
                "crate::adapters::v1alpha1",
                "--interface-package",
                "crate::generic",
            ],
        );

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("signature"));
        assert!(!dir.path().join("v1alpha1.rs").exists());
    }

    #[test]
    fn generate___missing_config___exits_non_zero() {
        let dir = TempDir::new().unwrap();

        let output = apibridge(
            dir.path(),
            &["generate", "--api", "v1", "-o", "out.rs", "--my-package", "crate::generic"],
        );

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
    }
}

mod check {
    use super::*;

    #[test]
    fn check___valid_project___reports_every_family() {
        let dir = project();

        let output = apibridge(dir.path(), &["check"]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("v1alpha1: 4 abstractions"));
        assert!(stdout.contains("v1beta1 (interface): 4 abstractions"));
    }

    #[test]
    fn check___verbose___logs_each_step() {
        let dir = project();

        let output = apibridge(dir.path(), &["-v", "check"]);

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Loaded configuration"));
        assert!(stderr.contains("Checked v1alpha1: 4 abstractions"));
        assert!(!String::from_utf8_lossy(&output.stdout).contains("Loaded configuration"));
    }

    #[test]
    fn check___quiet___logs_nothing() {
        let dir = project();

        let output = apibridge(dir.path(), &["check"]);

        assert!(output.status.success());
        assert!(!String::from_utf8_lossy(&output.stderr).contains("Loaded configuration"));
    }

    #[test]
    fn check___unknown_interface_api___fails() {
        let dir = project();
        let config = CONFIG.replace("interface_api = \"v1beta1\"", "interface_api = \"v1\"");
        fs::write(dir.path().join("apibridge.toml"), config).unwrap();

        let output = apibridge(dir.path(), &["check"]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("interface_api v1"));
    }
}

mod registry {
    use super::*;

    #[test]
    fn registry___family___prints_json() {
        let dir = project();

        let output = apibridge(dir.path(), &["registry", "--api", "v1beta1"]);

        assert!(output.status.success());
        let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(entries.as_array().unwrap().len(), 4);
        assert_eq!(entries[0]["name"], "Route");
    }
}
