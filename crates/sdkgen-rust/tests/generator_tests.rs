use indexmap::IndexMap;
use sdkgen_core::SdkGenerator;
use sdkgen_core::build::{ModuleNameRegistry, build_app};
use sdkgen_core::context::PackageMeta;
use sdkgen_core::spec;
use sdkgen_rust::RustClientGenerator;

const PETSTORE_V2: &str = r#"
swagger: "2.0"
info:
  title: Petstore
  version: 1.0.0
host: api.example.com
basePath: /v1
schemes:
  - https
paths:
  /pets:
    get:
      x-sdkMethodName: listPets
      summary: List pets
      parameters:
        - name: limit
          in: query
          type: integer
  /pets/{pet-id}:
    delete:
      x-sdkMethodName: deletePet
      parameters:
        - name: pet-id
          in: path
          required: true
          type: string
"#;

fn bundle() -> sdkgen_core::context::AppBundle {
    let mut specs = IndexMap::new();
    specs.insert("1.0.0".to_string(), spec::from_yaml(PETSTORE_V2).unwrap());

    let package = PackageMeta {
        name: "svc-depot".to_string(),
        version: "3.0.1".to_string(),
    };
    let mut registry = ModuleNameRegistry::new();
    build_app("petstore", &specs, &package, &mut registry)
        .unwrap()
        .expect("https spec is supported")
}

#[test]
fn generates_manifest_lib_and_version_modules() {
    let files = RustClientGenerator.generate(&bundle()).unwrap();

    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["Cargo.toml", "src/lib.rs", "src/v1_0_0.rs"]);
}

#[test]
fn manifest_names_the_generated_package() {
    let files = RustClientGenerator.generate(&bundle()).unwrap();
    let manifest = &files[0].content;

    assert!(manifest.contains(r#"name = "svc-depot-petstore-sdk""#));
    assert!(manifest.contains("-x.3.0.1"));
    assert!(manifest.contains("sdkgen-client"));
}

#[test]
fn lib_declares_one_module_per_version() {
    let files = RustClientGenerator.generate(&bundle()).unwrap();
    let lib = &files[1].content;

    assert!(lib.contains("pub mod v1_0_0;"));
    assert!(lib.contains("non_camel_case_types"));
}

#[test]
fn module_exposes_one_method_per_route() {
    let files = RustClientGenerator.generate(&bundle()).unwrap();
    let module = &files[2].content;

    assert!(module.contains("pub struct Depot_petstore_SDK_1_0_0"));
    assert!(module.contains(r#"pub const HOST: &str = "https://api.example.com";"#));
    assert!(module.contains(r#"pub const BASE_PATH: &str = "/v1";"#));

    assert!(module.contains("pub async fn list_pets("));
    assert!(module.contains("Method::GET"));

    assert!(module.contains("pub async fn delete_pet("));
    assert!(module.contains("pet_id: impl Into<String>"));
    assert!(module.contains(r#"options.url = "/pets/{pet-id}".to_string();"#));
}
