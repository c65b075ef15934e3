//! Maven `toolchains.xml` generation for the configured JDKs.

use crate::dependency_analysis::services::jdk_selector::JdkHomes;

/// File name Maven expects, written at the root of the repositories directory.
pub const TOOLCHAINS_FILE_NAME: &str = "toolchains.xml";

/// Renders a toolchains document with one `jdk` toolchain per configured home.
pub fn render_toolchains(homes: &JdkHomes) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <toolchains xmlns=\"http://maven.apache.org/TOOLCHAINS/1.1.0\"\n\
         \x20           xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n\
         \x20           xsi:schemaLocation=\"http://maven.apache.org/TOOLCHAINS/1.1.0 https://maven.apache.org/xsd/toolchains-1.1.0.xsd\">\n",
    );

    for (version, home) in homes.configured_homes() {
        xml.push_str("  <toolchain>\n");
        xml.push_str("    <type>jdk</type>\n");
        xml.push_str("    <provides>\n");
        xml.push_str(&format!(
            "      <version>{}</version>\n",
            version.toolchain_version()
        ));
        xml.push_str("    </provides>\n");
        xml.push_str("    <configuration>\n");
        xml.push_str(&format!(
            "      <jdkHome>{}</jdkHome>\n",
            escape_xml(&home.display().to_string())
        ));
        xml.push_str("    </configuration>\n");
        xml.push_str("  </toolchain>\n");
    }

    xml.push_str("</toolchains>\n");
    xml
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
