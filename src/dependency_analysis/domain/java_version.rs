use std::fmt;

/// JDK releases that can be configured through `JAVA<N>_HOME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JavaVersion {
    Java8,
    Java11,
    Java17,
    Java21,
}

impl JavaVersion {
    /// Fallback order when the detected JDK fails: newest first.
    pub const PRIORITY: [JavaVersion; 4] = [
        JavaVersion::Java21,
        JavaVersion::Java17,
        JavaVersion::Java11,
        JavaVersion::Java8,
    ];

    pub fn major(self) -> u32 {
        match self {
            JavaVersion::Java8 => 8,
            JavaVersion::Java11 => 11,
            JavaVersion::Java17 => 17,
            JavaVersion::Java21 => 21,
        }
    }

    /// Environment variable / label naming this JDK's home.
    pub fn home_variable(self) -> &'static str {
        match self {
            JavaVersion::Java8 => "JAVA8_HOME",
            JavaVersion::Java11 => "JAVA11_HOME",
            JavaVersion::Java17 => "JAVA17_HOME",
            JavaVersion::Java21 => "JAVA21_HOME",
        }
    }

    /// Version string Maven toolchains use for this JDK.
    pub fn toolchain_version(self) -> &'static str {
        match self {
            JavaVersion::Java8 => "1.8",
            JavaVersion::Java11 => "11",
            JavaVersion::Java17 => "17",
            JavaVersion::Java21 => "21",
        }
    }

    /// Smallest configurable JDK able to compile for `major`.
    /// Returns `None` past the newest configurable release.
    pub fn for_major(major: u32) -> Option<Self> {
        match major {
            0..=8 => Some(JavaVersion::Java8),
            9..=11 => Some(JavaVersion::Java11),
            12..=17 => Some(JavaVersion::Java17),
            18..=21 => Some(JavaVersion::Java21),
            _ => None,
        }
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Java {}", self.major())
    }
}

/// A Java release requirement read from a build descriptor
/// (`maven.compiler.release`, a Gradle wrapper mapping, ...).
///
/// Ordered by major version so the most restrictive of several signals is
/// simply the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JavaRequirement(u32);

impl JavaRequirement {
    pub fn new(major: u32) -> Self {
        Self(major)
    }

    /// Parses values such as `17`, `17.0`, `1.8` or `11.0.2`.
    /// Placeholders like `${java.version}` and other non-numeric text yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<u32> = value
            .trim()
            .split('.')
            .map(|part| part.parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()?;

        match parts.as_slice() {
            [1, minor, ..] => Some(Self(*minor)),
            [major, ..] => Some(Self(*major)),
            [] => None,
        }
    }

    pub fn major(self) -> u32 {
        self.0
    }

    pub fn configured_version(self) -> Option<JavaVersion> {
        JavaVersion::for_major(self.0)
    }
}

impl fmt::Display for JavaRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
