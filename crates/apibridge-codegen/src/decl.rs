//! Declarations emitted into generated files, and their writers.

/// How a method takes `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// `&self`
    Ref,
    /// `&mut self`
    Mut,
    /// `self: Box<Self>`
    Boxed,
}

impl Receiver {
    fn as_str(self) -> &'static str {
        match self {
            Receiver::Ref => "&self",
            Receiver::Mut => "&mut self",
            Receiver::Boxed => "self: Box<Self>",
        }
    }
}

/// A generated method: signature plus body lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub docs: Vec<String>,
    pub receiver: Receiver,
    /// (name, type) pairs after the receiver.
    pub params: Vec<(String, String)>,
    pub ret: Option<String>,
    /// Body lines, indented relative to the body.
    pub body: Vec<String>,
}

impl Function {
    pub fn new(name: impl Into<String>, receiver: Receiver) -> Self {
        Self {
            name: name.into(),
            docs: Vec::new(),
            receiver,
            params: Vec::new(),
            ret: None,
            body: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push((name.into(), ty.into()));
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.ret = Some(ty.into());
        self
    }

    pub fn docs(mut self, docs: &[String]) -> Self {
        self.docs = docs.to_vec();
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.extend(lines.into_iter().map(Into::into));
        self
    }

    /// `fn name(recv, params) -> ret`, the text traits are matched on.
    pub fn signature(&self) -> String {
        let mut sig = format!("fn {}({}", self.name, self.receiver.as_str());
        for (name, ty) in &self.params {
            sig.push_str(&format!(", {name}: {ty}"));
        }
        sig.push(')');
        if let Some(ret) = &self.ret {
            sig.push_str(&format!(" -> {ret}"));
        }
        sig
    }

    fn write_declaration(&self, out: &mut String) {
        for doc in &self.docs {
            out.push_str(&format!("    /// {doc}\n"));
        }
        out.push_str(&format!("    {};\n", self.signature()));
    }

    fn write_definition(&self, out: &mut String, visibility: &str) {
        out.push_str(&format!("    {visibility}{} {{\n", self.signature()));
        for line in &self.body {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!("        {line}\n"));
            }
        }
        out.push_str("    }\n");
    }
}

/// A capability trait.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitDecl {
    pub name: String,
    pub docs: Vec<String>,
    pub methods: Vec<Function>,
}

impl TraitDecl {
    pub fn method(&self, name: &str) -> Option<&Function> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn write(&self, out: &mut String) {
        for doc in &self.docs {
            out.push_str(&format!("/// {doc}\n"));
        }
        out.push_str(&format!("pub trait {} {{\n", self.name));
        for method in &self.methods {
            method.write_declaration(out);
        }
        out.push_str("}\n");
    }
}

/// Where an adapter method came from.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodSource {
    Generated(Function),
    /// Hand-written `fn` item text, without visibility.
    Override { name: String, text: String },
}

impl MethodSource {
    pub fn name(&self) -> &str {
        match self {
            MethodSource::Generated(f) => &f.name,
            MethodSource::Override { name, .. } => name,
        }
    }

    fn write(&self, out: &mut String, visibility: &str) {
        match self {
            MethodSource::Generated(f) => f.write_definition(out, visibility),
            MethodSource::Override { text, .. } => {
                for (i, line) in text.lines().enumerate() {
                    if line.trim().is_empty() {
                        out.push('\n');
                    } else if i == 0 {
                        out.push_str(&format!("    {visibility}{line}\n"));
                    } else {
                        out.push_str(&format!("    {line}\n"));
                    }
                }
            }
        }
    }
}

/// What an adapter wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wrapped {
    /// `&'a mut T`
    Struct(String),
    /// `Slot<'a, Vec<T>>`, holding the element type.
    Collection(String),
}

/// An adapter type with its impls.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterDecl {
    pub name: String,
    pub abstract_name: String,
    pub wrapped: Wrapped,
    /// Implemented trait, once conformance has been checked.
    pub trait_path: Option<String>,
    pub trait_methods: Vec<MethodSource>,
    pub inherent: Vec<MethodSource>,
}

impl AdapterDecl {
    pub fn new(name: impl Into<String>, abstract_name: impl Into<String>, wrapped: Wrapped) -> Self {
        Self {
            name: name.into(),
            abstract_name: abstract_name.into(),
            wrapped,
            trait_path: None,
            trait_methods: Vec::new(),
            inherent: Vec::new(),
        }
    }

    pub fn write(&self, out: &mut String) {
        match &self.wrapped {
            Wrapped::Struct(ty) => {
                out.push_str(&format!("/// Adapts `{ty}`.\n"));
                out.push_str(&format!("pub struct {}<'a>(pub &'a mut {ty});\n", self.name));
            }
            Wrapped::Collection(elem) => {
                out.push_str(&format!("/// Adapts a collection of `{elem}`.\n"));
                out.push_str(&format!(
                    "pub struct {}<'a>(pub apibridge_runtime::Slot<'a, Vec<{elem}>>);\n",
                    self.name
                ));
            }
        }

        if let Some(trait_path) = &self.trait_path {
            out.push('\n');
            write_impl(out, &format!("impl {trait_path} for {}<'_>", self.name), &self.trait_methods, "");
        }

        if !self.inherent.is_empty() {
            out.push('\n');
            write_impl(out, &format!("impl {}<'_>", self.name), &self.inherent, "pub ");
        }
    }
}

fn write_impl(out: &mut String, header: &str, methods: &[MethodSource], visibility: &str) {
    if methods.is_empty() {
        out.push_str(&format!("{header} {{}}\n"));
        return;
    }
    out.push_str(&format!("{header} {{\n"));
    for (i, method) in methods.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        method.write(out, visibility);
    }
    out.push_str("}\n");
}

/// A top-level item of a generated file.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Trait(TraitDecl),
    Adapter(AdapterDecl),
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Trait(t) => &t.name,
            Decl::Adapter(a) => &a.name,
        }
    }

    pub fn write(&self, out: &mut String) {
        match self {
            Decl::Trait(t) => t.write(out),
            Decl::Adapter(a) => a.write(out),
        }
    }
}
