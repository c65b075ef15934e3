//! Normalized scope labels.
//!
//! Build tools name their dependency buckets differently (Gradle
//! configurations, CycloneDX component scopes). Both are folded into one
//! label set here; anything unrecognized passes through unchanged.

/// Gradle configurations whose trees are captured from `gradle dependencies`.
pub const RELEVANT_GRADLE_CONFIGURATIONS: [&str; 14] = [
    "implementation",
    "api",
    "compileOnly",
    "compileOnlyApi",
    "runtimeOnly",
    "runtimeClasspath",
    "compileClasspath",
    "testImplementation",
    "testCompileOnly",
    "testRuntimeOnly",
    "testRuntimeClasspath",
    "testCompileClasspath",
    "annotationProcessor",
    "testAnnotationProcessor",
];

/// Scope used when a CycloneDX component carries no `scope` field.
pub const DEFAULT_BOM_SCOPE: &str = "compile";

pub fn is_relevant_gradle_configuration(name: &str) -> bool {
    RELEVANT_GRADLE_CONFIGURATIONS.contains(&name)
}

pub fn scope_for_gradle_configuration(configuration: &str) -> String {
    match configuration {
        "implementation" | "compileClasspath" => "implementation",
        "runtimeClasspath" => "runtime",
        "testImplementation" | "testCompileClasspath" => "testImplementation",
        "testRuntimeClasspath" => "testRuntime",
        other => other,
    }
    .to_string()
}

pub fn scope_for_bom_component(scope: Option<&str>) -> String {
    match scope.map(str::trim) {
        None | Some("") => DEFAULT_BOM_SCOPE,
        Some("required") => "implementation",
        Some("optional") => "compileOnly",
        Some("excluded") => "excluded",
        Some(other) => other,
    }
    .to_string()
}
