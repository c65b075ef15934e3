/// Integration tests for the application layer
mod test_utilities;

use dep_searcher::application::use_cases::{annotate_checkouts, select_fetch_targets};
use dep_searcher::dependency_analysis::domain::SCM_URL_NOT_FOUND;
use dep_searcher::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use test_utilities::mocks::*;

const PARENT_POM: &str = r#"<project>
  <groupId>org.demo</groupId>
  <artifactId>demo-parent</artifactId>
  <version>1.0.0</version>
  <name>Demo</name>
  <modules>
    <module>service</module>
  </modules>
</project>"#;

const SERVICE_TREE: &str = r#"{"groupId":"org.demo","artifactId":"service","version":"1.0.0","children":[{"groupId":"com.google.guava","artifactId":"guava","version":"32.1.2-jre","scope":"compile"},{"groupId":"com.fasterxml.jackson.core","artifactId":"jackson-databind","version":"2.15.2","scope":"compile","children":[{"groupId":"com.fasterxml.jackson.core","artifactId":"jackson-core","version":"2.15.2","scope":"compile"}]},{"groupId":"org.junit.jupiter","artifactId":"junit-jupiter","version":"5.10.0","scope":"test"}]}"#;

const AGGREGATE_BOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.5">
  <metadata>
    <component type="application">
      <group>org.demo</group>
      <name>demo-parent</name>
      <version>1.0.0</version>
    </component>
  </metadata>
  <components>
    <component type="library">
      <group>com.google.guava</group>
      <name>guava</name>
      <version>32.1.2-jre</version>
      <externalReferences>
        <reference type="vcs"><url>https://github.com/google/guava</url></reference>
      </externalReferences>
    </component>
  </components>
</bom>"#;

fn directory_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

fn maven_log(json: &str) -> Vec<String> {
    vec![
        "[INFO] Scanning for projects...".to_string(),
        format!("[INFO] {}", json),
        "[INFO] BUILD SUCCESS".to_string(),
    ]
}

fn maven_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("pom.xml"), PARENT_POM).unwrap();
    temp_dir
}

fn jdk_selector() -> JdkSelector {
    let mut configured = BTreeMap::new();
    configured.insert(JavaVersion::Java11, PathBuf::from("/jdk/11"));
    configured.insert(JavaVersion::Java17, PathBuf::from("/jdk/17"));
    JdkSelector::new(JdkHomes::new(configured, Some(PathBuf::from("/jdk/ambient"))))
}

fn coordinate(spec: &str) -> Coordinate {
    let parts: Vec<&str> = spec.split(':').collect();
    Coordinate::new(parts[0], parts[1], parts[2])
}

fn load_demo_tree(use_cyclonedx: bool) -> (TreeResponse, MockProgressReporter) {
    let project = maven_project();
    let root = directory_name(project.path());
    let maven = MockMavenInvoker::new()
        .with_tree(
            &root,
            maven_log(r#"{"groupId":"org.demo","artifactId":"demo-parent","version":"1.0.0"}"#),
        )
        .with_tree("service", maven_log(SERVICE_TREE))
        .with_bom(AGGREGATE_BOM);
    let reporter = MockProgressReporter::new();

    let use_case = LoadDependenciesUseCase::new(
        MockProjectReader::with_pom(PARENT_POM),
        maven,
        MockGradleInvoker::new(),
        reporter.clone(),
        jdk_selector(),
        ScmOverrides::default(),
    );
    let response = use_case
        .execute(TreeRequest::new(
            project.path().to_path_buf(),
            use_cyclonedx,
            true,
        ))
        .unwrap();
    (response, reporter)
}

#[tokio::test]
async fn test_load_tree_and_resolve_scm() {
    let (mut response, _) = load_demo_tree(true);

    assert_eq!(response.project_name, "Demo");
    assert_eq!(response.project_type, ProjectType::Maven);
    assert_eq!(response.forest.len(), 3);
    assert_eq!(response.forest.node_count(), 4);
    assert_eq!(response.scm_from_bom, 1);
    assert!(response.scopes().contains("test"));

    let repository = MockDescriptorRepository::new().with_scm(
        "com.fasterxml.jackson.core:jackson-databind:2.15.2",
        "scm:git:git@github.com:FasterXML/jackson-databind.git",
    );
    let resolver = ScmResolver::new(
        repository,
        MockProgressReporter::new(),
        ScmOverrides::default(),
    );
    let summary = resolver.resolve(&mut response.forest).await;

    // guava came from the BOM and is not looked up again
    assert_eq!(summary.looked_up, 3);
    assert_eq!(summary.resolved, 1);
    assert_eq!(summary.not_found, 2);

    let forest = &response.forest;
    let guava = forest
        .find(&coordinate("com.google.guava:guava:32.1.2-jre"))
        .unwrap();
    assert!(guava.has_resolved_scm_url());
    assert_eq!(
        forest
            .find(&coordinate("com.fasterxml.jackson.core:jackson-databind:2.15.2"))
            .and_then(|n| n.scm_url()),
        Some("https://github.com/FasterXML/jackson-databind.git")
    );
    assert_eq!(
        forest
            .find(&coordinate("com.fasterxml.jackson.core:jackson-core:2.15.2"))
            .and_then(|n| n.scm_url()),
        Some(SCM_URL_NOT_FOUND)
    );
}

#[test]
fn test_load_tree_without_cyclonedx() {
    let (response, reporter) = load_demo_tree(false);

    assert_eq!(response.scm_from_bom, 0);
    assert!(response
        .forest
        .roots()
        .iter()
        .all(|node| node.scm_url().is_none()));
    assert!(reporter.errors().is_empty());
}

#[tokio::test]
async fn test_scm_resolution_survives_repository_failure() {
    let (mut response, _) = load_demo_tree(false);

    let resolver = ScmResolver::new(
        MockDescriptorRepository::with_failure(),
        MockProgressReporter::new(),
        ScmOverrides::default(),
    )
    .with_concurrency(2);
    let summary = resolver.resolve(&mut response.forest).await;

    assert_eq!(summary.looked_up, 4);
    assert_eq!(summary.resolved, 0);
    let mut unresolved = 0;
    response.forest.walk(&mut |node| {
        if node.scm_url() == Some(SCM_URL_NOT_FOUND) {
            unresolved += 1;
        }
    });
    assert_eq!(unresolved, 4);
}

fn fetch_forest() -> DependencyForest {
    let node = |spec: &str, url: Option<&str>| {
        DependencyNode::new(coordinate(spec)).with_scm_url(url.map(str::to_string))
    };
    DependencyForest::new(vec![
        node(
            "com.google.guava:guava:32.1.2-jre",
            Some("https://github.com/google/guava"),
        )
        .with_children(vec![node(
            "com.google.guava:failureaccess:1.0.1",
            Some(SCM_URL_NOT_FOUND),
        )]),
        node(
            "org.demo:legacy:1.0",
            None,
        )
        .with_children(vec![node(
            "com.google.guava:guava:31.0-jre",
            Some("https://github.com/google/guava"),
        )]),
        node(
            "com.fasterxml.jackson.core:jackson-databind:2.15.2",
            Some("https://github.com/FasterXML/jackson-databind"),
        ),
    ])
}

#[tokio::test]
async fn test_fetch_selected_repositories() {
    let mut forest = fetch_forest();
    let filter = SelectionFilter::new(vec!["guava".to_string(), "nothing*".to_string()]).unwrap();

    let targets = select_fetch_targets(&mut forest, &filter);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].version, "32.1.2-jre");
    assert_eq!(filter.unmatched_patterns(), vec!["nothing*".to_string()]);

    let git = MockGitClient::new().with_tags(
        "guava",
        &[
            ("v31.0", 100),
            ("v32.1.2-android", 300),
            ("v32.1.2-jre", 200),
        ],
    );
    let checkouts = Arc::clone(&git.checkouts);
    let fetcher = RepoFetcher::new(
        Arc::new(git),
        Arc::new(MockWorkspace::new()),
        MockProgressReporter::new(),
    );
    let response = fetcher
        .execute(FetchRequest::new(targets, PathBuf::from("/repos"), false))
        .await
        .unwrap();

    assert_eq!(
        response.checkout_tags.get("guava").map(String::as_str),
        Some("v32.1.2-jre")
    );
    assert!(!response.has_failures());
    assert_eq!(
        checkouts.lock().unwrap().clone(),
        vec![("guava".to_string(), "v32.1.2-jre".to_string())]
    );

    let annotated = annotate_checkouts(&mut forest, &response);
    assert_eq!(annotated, 2);
    assert_eq!(
        forest
            .find(&coordinate("com.google.guava:guava:31.0-jre"))
            .and_then(|n| n.checkout_tag()),
        Some("v32.1.2-jre")
    );
    assert!(forest
        .find(&coordinate("com.fasterxml.jackson.core:jackson-databind:2.15.2"))
        .and_then(|n| n.checkout_tag())
        .is_none());
}

#[tokio::test]
async fn test_fetch_continues_past_failures() {
    let mut forest = fetch_forest();
    let targets = select_fetch_targets(&mut forest, &SelectionFilter::new(vec![]).unwrap());
    assert_eq!(targets.len(), 2);

    let git = MockGitClient::new().with_tags("guava", &[("v32.1.2-jre", 200)]);
    let clones = Arc::clone(&git.clones);
    let reporter = MockProgressReporter::new();
    let fetcher = RepoFetcher::new(
        Arc::new(git),
        Arc::new(MockWorkspace::new()),
        reporter.clone(),
    )
    .with_concurrency(1);
    let response = fetcher
        .execute(FetchRequest::new(targets, PathBuf::from("/repos"), true))
        .await
        .unwrap();

    assert_eq!(response.checkout_tags.len(), 1);
    assert!(response.failures["jackson-databind"].contains("not found"));
    assert_eq!(clones.lock().unwrap().len(), 2);
    assert!(reporter
        .errors()
        .iter()
        .any(|e| e.contains("jackson-databind")));
}

#[test]
fn test_build_falls_back_across_jdks() {
    let root = TempDir::new().unwrap();
    let maven_lib = root.path().join("maven-lib");
    let gradle_app = root.path().join("gradle-app");
    let notes = root.path().join("notes");
    for dir in [&maven_lib, &gradle_app, &notes] {
        fs::create_dir_all(dir).unwrap();
    }
    fs::write(maven_lib.join("pom.xml"), "<project/>").unwrap();
    fs::write(gradle_app.join("build.gradle"), "").unwrap();

    let maven = MockMavenInvoker::new()
        .with_effective_pom(
            "[INFO] Effective POMs\n<project><properties><maven.compiler.release>11</maven.compiler.release></properties></project>\n[INFO] BUILD SUCCESS",
        )
        .passing_on("/jdk/17");
    let maven_builds = Arc::clone(&maven.builds);
    let gradle = MockGradleInvoker::new().passing_on("/jdk/17");
    let gradle_calls = Arc::clone(&gradle.calls);
    let workspace = MockWorkspace::with_repositories(vec![
        maven_lib.clone(),
        gradle_app.clone(),
        notes.clone(),
    ]);
    let files = Arc::clone(&workspace.files);

    let mut orchestrator = BuildOrchestrator::new(
        MockProjectReader::default(),
        maven,
        gradle,
        workspace,
        MockProgressReporter::new(),
        jdk_selector(),
    );
    let response = orchestrator
        .execute(BuildRequest::new(root.path().to_path_buf()))
        .unwrap();

    assert_eq!(
        response.outcomes["maven-lib"],
        BuildOutcome::Succeeded {
            jdk: "JAVA17_HOME".to_string()
        }
    );
    assert_eq!(
        response.outcomes["gradle-app"],
        BuildOutcome::Succeeded {
            jdk: "JAVA17_HOME".to_string()
        }
    );
    assert_eq!(response.outcomes["notes"], BuildOutcome::InternalError);
    assert!(response.has_failures());
    assert_eq!(response.last_jdk_used.as_deref(), Some("JAVA17_HOME"));

    // detected Java 11, then JAVA_HOME, then Java 17; each failure retried once
    let builds = maven_builds.lock().unwrap().clone();
    let expected: Vec<(String, PathBuf)> = vec![
        ("clean package".to_string(), PathBuf::from("/jdk/11")),
        ("package".to_string(), PathBuf::from("/jdk/11")),
        ("clean package".to_string(), PathBuf::from("/jdk/ambient")),
        ("package".to_string(), PathBuf::from("/jdk/ambient")),
        ("clean package".to_string(), PathBuf::from("/jdk/17")),
    ];
    assert_eq!(builds, expected);

    // Gradle 8.0 (no wrapper) detects Java 17 and passes first time
    assert_eq!(
        gradle_calls.lock().unwrap().clone(),
        vec!["stop /jdk/17".to_string(), "build /jdk/17".to_string()]
    );

    let toolchains = files
        .lock()
        .unwrap()
        .get(&root.path().join("toolchains.xml"))
        .cloned()
        .unwrap();
    assert!(toolchains.contains("<jdkHome>/jdk/11</jdkHome>"));
    assert!(toolchains.contains("<jdkHome>/jdk/17</jdkHome>"));
}
