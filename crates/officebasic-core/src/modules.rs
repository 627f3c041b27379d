//! Host-provided module and procedure metadata.
//!
//! The editor shell hands the engine an ordered list of named modules, each
//! with its pristine source and the procedure metadata extracted by the
//! shell's structural parser. This module is the data model for that input;
//! the engine never re-derives procedure metadata itself.

/// The kind of a macro module, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleKind {
    /// A plain macro module.
    #[default]
    Standard,
    /// A class module.
    Class,
    /// A module bound to a document object (sheet, slide, ...).
    Document,
}

/// One macro module of the open document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroModule {
    /// Module name, unique within the document (compared case-insensitively).
    pub name: String,
    /// Module kind.
    pub kind: ModuleKind,
    /// Pristine source as last loaded or saved by the host.
    pub source_code: String,
    /// Procedures defined in this module, pre-extracted by the host.
    pub procedures: Vec<ProcedureInfo>,
}

impl MacroModule {
    /// Create an empty module of the given kind.
    pub fn new(name: impl Into<String>, kind: ModuleKind) -> Self {
        Self {
            name: name.into(),
            kind,
            source_code: String::new(),
            procedures: Vec::new(),
        }
    }

    /// Create a module with source and procedure metadata.
    pub fn with_source(
        name: impl Into<String>,
        kind: ModuleKind,
        source_code: impl Into<String>,
        procedures: Vec<ProcedureInfo>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            source_code: source_code.into(),
            procedures,
        }
    }
}

/// Whether a routine returns a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureKind {
    /// `Sub`: no return value.
    Sub,
    /// `Function`: returns a value.
    Function,
}

/// Metadata for one routine, as extracted by the host's structural parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureInfo {
    /// Routine name.
    pub name: String,
    /// `Sub` or `Function`.
    pub kind: ProcedureKind,
    /// Declared parameters, in order.
    pub parameters: Vec<ParameterInfo>,
    /// Declared return type, for functions.
    pub return_type: Option<String>,
}

impl ProcedureInfo {
    /// Render the routine's signature the way the editor displays it:
    /// `Sub Name(a As Long)` / `Function Name(x) As String`.
    pub fn signature(&self) -> String {
        let keyword = match self.kind {
            ProcedureKind::Sub => "Sub",
            ProcedureKind::Function => "Function",
        };
        let params: Vec<String> = self.parameters.iter().map(ParameterInfo::render).collect();
        let mut rendered = format!("{keyword} {}({})", self.name, params.join(", "));
        if let Some(return_type) = &self.return_type {
            rendered.push_str(" As ");
            rendered.push_str(return_type);
        }
        rendered
    }

    /// Parameter labels for signature help, one rendered entry per
    /// declared parameter.
    pub fn parameter_labels(&self) -> Vec<String> {
        self.parameters.iter().map(ParameterInfo::render).collect()
    }
}

/// Metadata for one declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// Parameter name.
    pub name: String,
    /// `true` for `ByVal` parameters; `ByRef` is the dialect default.
    pub by_val: bool,
    /// `true` for `Optional` parameters.
    pub optional: bool,
    /// Declared type, when present.
    pub param_type: Option<String>,
}

impl ParameterInfo {
    /// A required `ByRef` parameter with an optional type.
    pub fn new(name: impl Into<String>, param_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            by_val: false,
            optional: false,
            param_type: param_type.map(str::to_string),
        }
    }

    /// Render the parameter the way signatures display it; optional
    /// parameters are bracketed.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.optional {
            out.push('[');
        }
        if self.by_val {
            out.push_str("ByVal ");
        }
        out.push_str(&self.name);
        if let Some(param_type) = &self.param_type {
            out.push_str(" As ");
            out.push_str(param_type);
        }
        if self.optional {
            out.push(']');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_function() -> ProcedureInfo {
        ProcedureInfo {
            name: "Interest".to_string(),
            kind: ProcedureKind::Function,
            parameters: vec![
                ParameterInfo::new("principal", Some("Double")),
                ParameterInfo {
                    name: "years".to_string(),
                    by_val: true,
                    optional: false,
                    param_type: Some("Integer".to_string()),
                },
                ParameterInfo {
                    name: "rate".to_string(),
                    by_val: false,
                    optional: true,
                    param_type: None,
                },
            ],
            return_type: Some("Double".to_string()),
        }
    }

    #[test]
    fn test_function_signature_rendering() {
        assert_eq!(
            sample_function().signature(),
            "Function Interest(principal As Double, ByVal years As Integer, [rate]) As Double"
        );
    }

    #[test]
    fn test_sub_signature_rendering() {
        let type_less = ProcedureInfo {
            name: "Main".to_string(),
            kind: ProcedureKind::Sub,
            parameters: Vec::new(),
            return_type: None,
        };
        assert_eq!(type_less.signature(), "Sub Main()");
    }

    #[test]
    fn test_parameter_labels_match_signature_pieces() {
        let labels = sample_function().parameter_labels();
        assert_eq!(
            labels,
            vec!["principal As Double", "ByVal years As Integer", "[rate]"]
        );
    }
}
