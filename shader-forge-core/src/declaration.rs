use crate::BuildError;
use std::fmt;
use std::str::FromStr;

/// File suffix of the vertex stage of a bare declaration.
pub const VERTEX_SUFFIX: &str = "vert";
/// File suffix of the fragment stage of a bare declaration.
pub const FRAGMENT_SUFFIX: &str = "frag";

/// A declared shader name.
///
/// The presence of a `.` decides the variant:
/// - `voxel` is [`ShaderDeclaration::Bare`] and expands to `voxel.vert` and `voxel.frag`.
/// - `post.comp` is [`ShaderDeclaration::Explicit`] and names exactly one source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShaderDeclaration {
    /// A name without extension, compiled as a vertex/fragment pair.
    Bare(String),
    /// A fully qualified source file name, compiled as-is.
    Explicit(String),
}

impl ShaderDeclaration {
    /// Classifies a token without validating it.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.contains('.') {
            Self::Explicit(token)
        } else {
            Self::Bare(token)
        }
    }

    /// Classifies a token, rejecting empty or whitespace-only names.
    pub fn parse(token: &str) -> Result<Self, BuildError> {
        if token.trim().is_empty() {
            return Err(BuildError::InvalidDeclaration(format!(
                "shader name must not be empty (got {token:?})"
            )));
        }
        Ok(Self::new(token))
    }

    /// The token as it was declared.
    pub fn name(&self) -> &str {
        match self {
            Self::Bare(name) | Self::Explicit(name) => name,
        }
    }

    /// Returns `true` for declarations that name a single source file.
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// Number of compiler invocations this declaration expands to.
    pub const fn invocation_count(&self) -> usize {
        match self {
            Self::Bare(_) => 2,
            Self::Explicit(_) => 1,
        }
    }

    /// Source file names in compilation order. Vertex comes before fragment.
    pub fn source_files(&self) -> Vec<String> {
        match self {
            Self::Bare(name) => vec![
                format!("{name}.{VERTEX_SUFFIX}"),
                format!("{name}.{FRAGMENT_SUFFIX}"),
            ],
            Self::Explicit(name) => vec![name.clone()],
        }
    }
}

impl fmt::Display for ShaderDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShaderDeclaration {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for ShaderDeclaration {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name_expands_to_stage_pair() {
        let decl = ShaderDeclaration::new("voxel");
        assert_eq!(decl, ShaderDeclaration::Bare("voxel".to_owned()));
        assert!(!decl.is_explicit());
        assert_eq!(decl.invocation_count(), 2);
        assert_eq!(decl.source_files(), vec!["voxel.vert", "voxel.frag"]);
    }

    #[test]
    fn test_explicit_name_is_used_verbatim() {
        let decl = ShaderDeclaration::new("post.comp");
        assert!(decl.is_explicit());
        assert_eq!(decl.invocation_count(), 1);
        assert_eq!(decl.source_files(), vec!["post.comp"]);
    }

    #[test]
    fn test_any_period_makes_it_explicit() {
        // Only the presence of a period matters, not where it is.
        assert!(ShaderDeclaration::new("lib.common.glsl").is_explicit());
        assert!(ShaderDeclaration::new(".hidden").is_explicit());
        assert!(ShaderDeclaration::new("trailing.").is_explicit());
    }

    #[test]
    fn test_parse_rejects_empty_names() {
        assert!(matches!(
            ShaderDeclaration::parse(""),
            Err(BuildError::InvalidDeclaration(_))
        ));
        assert!("   ".parse::<ShaderDeclaration>().is_err());
        assert_eq!(
            "shader".parse::<ShaderDeclaration>(),
            Ok(ShaderDeclaration::Bare("shader".to_owned()))
        );
    }

    #[test]
    fn test_display_round_trips_name() {
        assert_eq!(ShaderDeclaration::new("sky.frag").to_string(), "sky.frag");
        assert_eq!(ShaderDeclaration::from("sky").name(), "sky");
    }
}
