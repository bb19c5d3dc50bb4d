//! End-to-end generation runs against in-memory and on-disk filesystems.

use std::path::Path;

use blueprint_codegen::{
    ArtifactKind, CodeGenerator, CollisionState, FileAction, GenerationOptions, LocalFilesystem,
    MemoryFilesystem, ScriptedDecisions, StubSet,
};
use blueprint_core::{
    ControllerSpec, DataType, Entity, GeneratorConfig, RelationshipKind, RelationshipRef,
    ResourceStatement, SchemaTree, Statement,
};

const BLOG: &str = r#"
models:
  - name: Post
    soft_deletes: true
    fields:
      title: string
      body: text
      password: string
      remember_token: string
    relationships:
      hasMany: Comment, Ghost
      belongsTo: Author
  - name: Comment
    fields:
      content: text
  - name: Author
    fields:
      name: string
      email: string
controllers:
  - name: Post
    methods:
      index:
        - kind: query
          model: Post
        - kind: resource
          reference: posts
          collection: true
      show:
        - kind: resource
          reference: post
  - name: Video
    namespace: Api
    methods:
      show:
        - kind: resource
          reference: video
  - name: Comment
    methods:
      show:
        - kind: resource
          reference: comment
"#;

const POST_RESOURCE: &str = "app/Http/Resources/PostResource.php";
const POST_COLLECTION: &str = "app/Http/Resources/PostCollection.php";
const COMMENT_RESOURCE: &str = "app/Http/Resources/CommentResource.php";

fn blog() -> SchemaTree {
    SchemaTree::from_yaml(BLOG).unwrap()
}

fn resources_only() -> GenerationOptions {
    GenerationOptions {
        only: vec![ArtifactKind::Resource],
        skip: Vec::new(),
    }
}

#[test]
fn test_full_run_writes_every_artifact() {
    let fs = MemoryFilesystem::new();
    let mut decisions = ScriptedDecisions::default();

    let report = CodeGenerator::new(GeneratorConfig::default())
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap();

    let written: Vec<_> = report.written().map(Path::to_path_buf).collect();
    assert_eq!(
        written,
        [
            POST_COLLECTION,
            POST_RESOURCE,
            COMMENT_RESOURCE,
            "database/factories/PostFactory.php",
            "database/factories/CommentFactory.php",
            "database/factories/AuthorFactory.php",
        ]
        .map(Path::new)
    );
    assert!(decisions.asked().is_empty());

    let author_factory = fs.get("database/factories/AuthorFactory.php").unwrap();
    assert!(author_factory.contains("'name' => $faker->name,\n            'email' => $faker->safeEmail,"));
}

#[test]
fn test_failed_statement_does_not_block_siblings() {
    let fs = MemoryFilesystem::new();
    let mut decisions = ScriptedDecisions::default();

    let report = CodeGenerator::new(GeneratorConfig::default())
        .with_options(resources_only())
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap();

    assert!(report.has_failures());
    assert_eq!(report.failures().len(), 1);

    let failure = &report.failures()[0];
    assert!(failure.error.is_resolution());
    assert_eq!(failure.path, Path::new("app/Http/Resources/Api/VideoResource.php"));
    assert!(failure.subject.contains("VideoResource"));

    assert!(fs.get("app/Http/Resources/Api/VideoResource.php").is_none());
    assert_eq!(report.action_for(Path::new(COMMENT_RESOURCE)), Some(FileAction::Written));
}

#[test]
fn test_resource_body_order_and_exclusions() {
    let fs = MemoryFilesystem::new();
    let mut decisions = ScriptedDecisions::default();

    CodeGenerator::new(GeneratorConfig::default())
        .with_options(resources_only())
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap();

    let php = fs.get(POST_RESOURCE).unwrap();
    let expected = [
        "        return [",
        "            'title' => $this->title,",
        "            'body' => $this->body,",
        "            'comments' => CommentCollection::make($this->whenLoaded('comments')),",
        "            'author' => AuthorResource::make($this->whenLoaded('author')),",
        "            'updated_at' => $this->updated_at,",
        "            'created_at' => $this->created_at,",
        "            'deleted_at' => $this->deleted_at,",
        "        ];",
    ]
    .join("\n");

    assert!(php.contains(&expected), "unexpected body:\n{}", php);
    assert!(!php.contains("password"));
    assert!(!php.contains("remember_token"));
    assert!(!php.contains("ghost"));
    assert!(!php.contains("Ghost"));
}

#[test]
fn test_yes_then_all_overwrites_remaining_files_without_asking() {
    let fs = MemoryFilesystem::new()
        .with_file(POST_COLLECTION, "old")
        .with_file(POST_RESOURCE, "old")
        .with_file(COMMENT_RESOURCE, "old");
    let mut decisions = ScriptedDecisions::from_tokens(["yes", "all", "ignored"]);

    let report = CodeGenerator::new(GeneratorConfig::default())
        .with_options(resources_only())
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap();

    for path in [POST_COLLECTION, POST_RESOURCE, COMMENT_RESOURCE] {
        assert_eq!(report.action_for(Path::new(path)), Some(FileAction::Written));
        assert_ne!(fs.get(path).as_deref(), Some("old"));
    }
    assert_eq!(
        decisions.asked(),
        [Path::new(POST_COLLECTION), Path::new(POST_RESOURCE)]
    );
    assert_eq!(decisions.remaining(), 1);
}

#[test]
fn test_no_then_not_all_keeps_existing_files() {
    let fs = MemoryFilesystem::new()
        .with_file(POST_COLLECTION, "old")
        .with_file(POST_RESOURCE, "old")
        .with_file(COMMENT_RESOURCE, "old");
    let mut decisions = ScriptedDecisions::from_tokens(["n", "na"]);

    let report = CodeGenerator::new(GeneratorConfig::default())
        .with_options(resources_only())
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap();

    assert_eq!(report.skipped().count(), 3);
    assert_eq!(report.written().count(), 0);
    assert_eq!(decisions.asked().len(), 2);
    assert_eq!(fs.get(COMMENT_RESOURCE).as_deref(), Some("old"));
}

#[test]
fn test_skipped_statement_is_not_resolved() {
    let fs = MemoryFilesystem::new().with_file("app/Http/Resources/Api/VideoResource.php", "mine");
    let mut decisions = ScriptedDecisions::from_tokens(["na"]);

    let report = CodeGenerator::new(GeneratorConfig::default())
        .with_options(resources_only())
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap();

    assert!(!report.has_failures());
    assert_eq!(
        report.action_for(Path::new("app/Http/Resources/Api/VideoResource.php")),
        Some(FileAction::Skipped)
    );
}

#[test]
fn test_policy_resets_between_runs() {
    let fs = MemoryFilesystem::new()
        .with_file(POST_COLLECTION, "old")
        .with_file(POST_RESOURCE, "old")
        .with_file(COMMENT_RESOURCE, "old");
    let generator = CodeGenerator::new(GeneratorConfig::default()).with_options(resources_only());

    let mut first = ScriptedDecisions::from_tokens(["a"]);
    generator
        .generate(&blog(), &StubSet::defaults(), &fs, &mut first)
        .unwrap();
    assert_eq!(first.asked().len(), 1);

    let mut second = ScriptedDecisions::from_tokens(["n", "n", "n"]);
    let report = generator
        .generate(&blog(), &StubSet::defaults(), &fs, &mut second)
        .unwrap();
    assert_eq!(second.asked().len(), 3);
    assert_eq!(report.skipped().count(), 3);
}

#[test]
fn test_write_failure_aborts_the_run() {
    let fs = MemoryFilesystem::new().deny_writes_under("app");
    let mut decisions = ScriptedDecisions::default();

    let error = CodeGenerator::new(GeneratorConfig::default())
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap_err();

    assert!(error.is_io());
    assert!(fs.paths().is_empty());
}

#[test]
fn test_stub_overrides_and_config_are_applied() {
    let fs = MemoryFilesystem::new();
    let mut decisions = ScriptedDecisions::default();
    let stubs = StubSet::defaults().with_stub(
        ArtifactKind::Resource,
        "{{ namespace }}|{{ class }}|{{ parentClass }}\n{{ body }}",
    );
    let tree = SchemaTree::new(
        vec![Entity::new("Author")
            .with_field("name", DataType::String)
            .with_relationship(RelationshipKind::HasMany, RelationshipRef::new("App\\Models\\Post"))],
        vec![ControllerSpec::new("Author")
            .with_namespace("Admin")
            .with_method("show", vec![Statement::Resource(ResourceStatement::new("authors", false))])],
    )
    .unwrap();

    let config = GeneratorConfig::default()
        .with_namespace("Acme")
        .with_when_not_null(true);
    CodeGenerator::new(config)
        .with_options(resources_only())
        .generate(&tree, &stubs, &fs, &mut decisions)
        .unwrap();

    let php = fs.get("app/Http/Resources/Admin/AuthorResource.php").unwrap();
    let expected = [
        "Acme\\Http\\Resources\\Admin|AuthorResource|JsonResource",
        "return [",
        "            'name' => $this->whenNotNull($this->name),",
        "            'updated_at' => $this->whenNotNull($this->updated_at),",
        "            'created_at' => $this->whenNotNull($this->created_at),",
        "        ];",
    ]
    .join("\n");
    assert_eq!(php, expected);
}

#[test]
fn test_forced_runs_are_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let fs = LocalFilesystem::new(dir.path());
    let generator = CodeGenerator::new(GeneratorConfig::default())
        .with_initial_state(CollisionState::AlwaysOverwrite);

    let mut decisions = ScriptedDecisions::default();
    let first = generator
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap();

    let snapshot: Vec<(String, String)> = first
        .written()
        .map(|path| {
            let content = std::fs::read_to_string(dir.path().join(path)).unwrap();
            (path.display().to_string(), content)
        })
        .collect();
    assert_eq!(snapshot.len(), 6);

    let second = generator
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap();
    assert_eq!(second.written().count(), 6);
    assert!(decisions.asked().is_empty());

    for (path, content) in snapshot {
        assert_eq!(std::fs::read_to_string(dir.path().join(&path)).unwrap(), content);
    }
}

#[test]
fn test_skip_existing_never_asks() {
    let dir = tempfile::tempdir().unwrap();
    let fs = LocalFilesystem::new(dir.path());
    std::fs::create_dir_all(dir.path().join("database/factories")).unwrap();
    std::fs::write(dir.path().join("database/factories/PostFactory.php"), "custom").unwrap();

    let mut decisions = ScriptedDecisions::default();
    let report = CodeGenerator::new(GeneratorConfig::default())
        .with_options(GenerationOptions {
            only: Vec::new(),
            skip: vec![ArtifactKind::Resource],
        })
        .with_initial_state(CollisionState::AlwaysSkip)
        .generate(&blog(), &StubSet::defaults(), &fs, &mut decisions)
        .unwrap();

    assert_eq!(
        report.action_for(Path::new("database/factories/PostFactory.php")),
        Some(FileAction::Skipped)
    );
    assert_eq!(report.written().count(), 2);
    assert!(decisions.asked().is_empty());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("database/factories/PostFactory.php")).unwrap(),
        "custom"
    );
}
