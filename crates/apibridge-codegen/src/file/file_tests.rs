#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

const HUB_SCHEMA: &str = r#"
    #[derive(Serialize, Deserialize)]
    pub struct Route {
        pub name: String,
        pub traffic: Vec<TrafficTarget>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct TrafficTarget {
        pub tag: Option<String>,
        pub percent: i64,
    }
"#;

const SPOKE_SCHEMA: &str = r#"
    #[derive(Serialize, Deserialize)]
    pub struct Route {
        pub name: String,
        pub traffic: Vec<TrafficTarget>,
        pub generation: i64,
    }

    #[derive(Serialize, Deserialize)]
    pub struct TrafficTarget {
        pub tag: Option<String>,
        pub percent: i64,
    }
"#;

const CONFIG: &str = r#"
license = "Copyright 2026 The Authors\n\nLicensed under MIT."
interface_api = "v1"

[[sources]]
package = "crate::schema::v1"
path = "schema/v1.rs"

[[sources]]
package = "crate::schema::v2"
path = "schema/v2.rs"

[api.v1]
package = "crate::schema::v1"
roots = ["Route"]

[api.v2]
package = "crate::schema::v2"
roots = ["Route"]
"#;

fn config() -> GeneratorConfig {
    GeneratorConfig::from_toml_str(CONFIG, ".").unwrap()
}

fn catalog() -> SchemaCatalog {
    let mut catalog = SchemaCatalog::new();
    catalog.load_source("crate::schema::v1", HUB_SCHEMA).unwrap();
    catalog.load_source("crate::schema::v2", SPOKE_SCHEMA).unwrap();
    catalog
}

fn interface_request() -> GenerateRequest {
    GenerateRequest::new("v1", FileKind::Interface, "crate::generic").invocation("generate --api v1")
}

fn implementation_request(api: &str) -> GenerateRequest {
    GenerateRequest::new(api, FileKind::Implementation, format!("crate::adapters::{api}"))
        .interface_package("crate::generic")
        .invocation(format!("generate --api {api}"))
}

#[test]
fn generate_file___interface___writes_header_uses_and_sorted_traits() {
    let out = generate_file(&config(), &catalog(), &interface_request()).unwrap();

    assert!(out.starts_with(
        "// Copyright 2026 The Authors\n\
         //\n\
         // Licensed under MIT.\n\
         \n\
         // Code generated by apibridge generate --api v1. DO NOT EDIT.\n\
         // Module: crate::generic\n\
         \n\
         use crate::schema::v1;\n"
    ));
    let route = out.find("pub trait Route {").unwrap();
    let target = out.find("pub trait TrafficTarget {").unwrap();
    let slice = out.find("pub trait TrafficTargetSlice {").unwrap();
    assert!(route < target && target < slice);
}

#[test]
fn generate_file___implementation___qualifies_traits_and_prefixes_adapters() {
    let out = generate_file(&config(), &catalog(), &implementation_request("v2")).unwrap();

    // `v2` is taken by the module itself.
    assert!(out.contains("use crate::generic;\n"));
    assert!(out.contains("use crate::schema::v2 as schemav2;\n"));
    assert!(out.contains("pub struct V2Route<'a>(pub &'a mut schemav2::Route);"));
    assert!(out.contains("impl generic::Route for V2Route<'_> {"));
    assert!(out.contains("impl V2Route<'_> {\n    pub fn get_generation(&self) -> i64 {"));
    assert!(out.contains("impl generic::TrafficTargetSlice for V2TrafficTargetSlice<'_> {"));
}

#[test]
fn generate_file___same_inputs___are_byte_identical() {
    let config = config();
    let catalog = catalog();

    let first = generate_file(&config, &catalog, &implementation_request("v2")).unwrap();
    let second = generate_file(&config, &catalog, &implementation_request("v2")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn generate_file___hub_family___implements_its_own_traits() {
    let out = generate_file(&config(), &catalog(), &implementation_request("v1")).unwrap();

    assert!(out.contains("impl generic::Route for V1Route<'_> {"));
    assert!(!out.contains("impl V1Route<'_> {"));
}

#[test]
fn generate_file___unknown_api___fails() {
    let request = GenerateRequest::new("v9", FileKind::Implementation, "crate::adapters::v9");

    let err = generate_file(&config(), &catalog(), &request).unwrap_err();

    assert!(matches!(err, GenError::UnknownApi(api) if api == "v9"));
}

#[test]
fn generate_file___overrides___append_helpers_after_declarations() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("v2.rs"),
        "impl V2Route<'_> {\n    fn describe(&self) -> String {\n        label(&self.0.name)\n    }\n}\n\nfn label(name: &str) -> String {\n    format!(\"route {name}\")\n}\n",
    )
    .unwrap();
    let content = CONFIG.replace(
        "[api.v2]\npackage = \"crate::schema::v2\"\n",
        "[api.v2]\npackage = \"crate::schema::v2\"\noverrides = \"v2.rs\"\n",
    );
    let config = GeneratorConfig::from_toml_str(&content, dir.path()).unwrap();

    let out = generate_file(&config, &catalog(), &implementation_request("v2")).unwrap();

    assert!(out.contains("    pub fn describe(&self) -> String {\n        label(&self.0.name)\n    }\n"));
    assert!(out.ends_with("\nfn label(name: &str) -> String {\n    format!(\"route {name}\")\n}\n"));
}

#[test]
fn generate_file___element_with_nested_struct___builds_both_files() {
    let pod = r#"
        #[derive(Serialize, Deserialize)]
        pub struct Pod {
            pub containers: Vec<Container>,
        }

        #[derive(Serialize, Deserialize)]
        pub struct Container {
            pub name: String,
            pub resources: Resources,
        }

        #[derive(Serialize, Deserialize)]
        pub struct Resources {
            pub cpu: Option<String>,
        }
    "#;
    let config = GeneratorConfig::from_toml_str(
        r#"
            interface_api = "v1"

            [[sources]]
            package = "crate::schema::v1"
            path = "schema/v1.rs"

            [api.v1]
            package = "crate::schema::v1"
            roots = ["Pod"]
        "#,
        ".",
    )
    .unwrap();
    let mut catalog = SchemaCatalog::new();
    catalog.load_source("crate::schema::v1", pod).unwrap();

    let interface = generate_file(&config, &catalog, &interface_request()).unwrap();
    let adapters = generate_file(&config, &catalog, &implementation_request("v1")).unwrap();

    assert!(interface.contains(
        "    fn upsert(&mut self, name: String, resources: apibridge_runtime::ErasedValue) -> Box<dyn Container + '_>;"
    ));
    assert!(adapters.contains("impl generic::ContainerSlice for V1ContainerSlice<'_> {"));
}

#[test_case("interface", FileKind::Interface ; "interface")]
#[test_case("implementation", FileKind::Implementation ; "implementation")]
#[test_case("impl", FileKind::Implementation ; "short implementation")]
fn FileKind___from_str___parses(input: &str, expected: FileKind) {
    assert_eq!(input.parse::<FileKind>().unwrap(), expected);
}

#[test]
fn FileKind___unknown_name___fails() {
    assert!(matches!("trait".parse::<FileKind>(), Err(GenError::Config(_))));
}
