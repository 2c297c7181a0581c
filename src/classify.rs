//! Declaration classifier.
//!
//! Walks the top level of a module (never nested scopes) and decides which
//! bindings are component declarations, what kind each one is, and under which
//! export names it is visible. Pure: it only reports, the injector rewrites.

use std::collections::HashSet;

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};
use serde::Serialize;

use crate::config::TransformOptions;
use crate::diagnostic::SourceLocation;
use crate::inject::Edit;
use crate::roots::{RenderRoots, RootFinder};

/// Base name of the alias given to anonymous default exports.
pub const DEFAULT_EXPORT_ALIAS: &str = "__markedDefault";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentKind {
    FunctionDeclaration,
    ArrowFunctionComponent,
    ClassComponent,
    ComposedComponent,
    DefaultExportAnonymous,
    DefaultExportNamed,
}

/// Syntactic form of the rendering logic, independent of how it is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationShape {
    Function,
    Arrow,
    Class,
    Composed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    UnrecognizedShape,
    AttributeConflict,
    NoTaggableRoot,
}

/// How the injector reaches a declaration's rendered root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RenderPlan {
    pub roots: RenderRoots,
    /// Span of the component reference wrapped by a higher-order call.
    pub wrapped_reference: Option<(u32, u32)>,
    /// Rewrites giving an anonymous default export its alias.
    pub alias_edits: Vec<Edit>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDeclaration {
    pub kind: ComponentKind,
    pub shape: DeclarationShape,
    pub local_name: Option<String>,
    /// Local name, or the synthesized alias when the declaration has none.
    pub binding: String,
    pub is_default_export: bool,
    pub exports: Vec<String>,
    pub source_module_path: String,
    pub location: SourceLocation,
    #[serde(skip)]
    pub(crate) plan: RenderPlan,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsupportedDeclaration {
    pub binding: String,
    pub reason: SkipReason,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Classification {
    Component(ComponentDeclaration),
    Unsupported(UnsupportedDeclaration),
}

impl Classification {
    pub fn binding(&self) -> &str {
        match self {
            Classification::Component(decl) => &decl.binding,
            Classification::Unsupported(skip) => &skip.binding,
        }
    }

    pub fn as_component(&self) -> Option<&ComponentDeclaration> {
        match self {
            Classification::Component(decl) => Some(decl),
            Classification::Unsupported(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBinding {
    pub exported: String,
    pub local: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleClassification {
    pub module_path: String,
    pub declarations: Vec<Classification>,
    pub exports: Vec<ExportBinding>,
    pub parse_errors: Vec<String>,
}

impl ModuleClassification {
    pub fn components(&self) -> impl Iterator<Item = &ComponentDeclaration> {
        self.declarations.iter().filter_map(Classification::as_component)
    }

    pub fn get(&self, binding: &str) -> Option<&Classification> {
        self.declarations.iter().find(|c| c.binding() == binding)
    }

    pub fn component(&self, binding: &str) -> Option<&ComponentDeclaration> {
        self.get(binding).and_then(Classification::as_component)
    }
}

pub(crate) fn source_type() -> SourceType {
    SourceType::default()
        .with_module(true)
        .with_typescript(true)
        .with_jsx(true)
}

/// Parses and classifies `source`. Parse errors leave the declaration list empty.
pub fn classify_module(
    source: &str,
    module_path: &str,
    options: &TransformOptions,
) -> ModuleClassification {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type()).parse();
    if !ret.errors.is_empty() {
        return ModuleClassification {
            module_path: module_path.to_string(),
            parse_errors: ret.errors.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        };
    }
    classify_program(&ret.program, source, module_path, options)
}

pub(crate) fn classify_program(
    program: &Program<'_>,
    source: &str,
    module_path: &str,
    options: &TransformOptions,
) -> ModuleClassification {
    let mut classifier = Classifier::new(source, module_path, options);
    for stmt in &program.body {
        classifier.prescan(stmt);
    }
    for stmt in &program.body {
        classifier.statement(stmt);
    }
    classifier.finish()
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFIER
// ═══════════════════════════════════════════════════════════════════════════════

struct Candidate {
    binding: String,
    local_name: Option<String>,
    found: Option<(DeclarationShape, RenderPlan)>,
    is_default_export: bool,
    exports: Vec<String>,
    offset: u32,
}

struct Classifier<'s> {
    source: &'s str,
    module_path: &'s str,
    options: &'s TransformOptions,
    /// Imported bindings that name components by convention.
    imported_components: HashSet<String>,
    taken_names: HashSet<String>,
    default_local: Option<String>,
    candidates: Vec<Candidate>,
    exports: Vec<ExportBinding>,
    /// `export { a as b }` / `export default a` entries resolved after the walk.
    pending_exports: Vec<(String, String)>,
}

impl<'s> Classifier<'s> {
    fn new(source: &'s str, module_path: &'s str, options: &'s TransformOptions) -> Self {
        Classifier {
            source,
            module_path,
            options,
            imported_components: HashSet::new(),
            taken_names: HashSet::new(),
            default_local: None,
            candidates: Vec::new(),
            exports: Vec::new(),
            pending_exports: Vec::new(),
        }
    }

    fn prescan(&mut self, stmt: &Statement<'_>) {
        let mut names = Vec::new();
        match stmt {
            Statement::ImportDeclaration(import) => {
                if let Some(specifiers) = &import.specifiers {
                    for specifier in specifiers {
                        let local = match specifier {
                            ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local,
                            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local,
                            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local,
                        };
                        let name = local.name.to_string();
                        if is_component_name(&name) {
                            self.imported_components.insert(name.clone());
                        }
                        names.push(name);
                    }
                }
            }
            Statement::FunctionDeclaration(func) => push_id(&func.id, &mut names),
            Statement::ClassDeclaration(class) => push_id(&class.id, &mut names),
            Statement::VariableDeclaration(var) => {
                for decl in &var.declarations {
                    collect_binding_pattern(&decl.id, &mut names);
                }
            }
            Statement::ExportNamedDeclaration(export) => {
                match &export.declaration {
                    Some(Declaration::FunctionDeclaration(func)) => push_id(&func.id, &mut names),
                    Some(Declaration::ClassDeclaration(class)) => push_id(&class.id, &mut names),
                    Some(Declaration::VariableDeclaration(var)) => {
                        for decl in &var.declarations {
                            collect_binding_pattern(&decl.id, &mut names);
                        }
                    }
                    _ => {}
                }
                if export.source.is_none() {
                    for specifier in &export.specifiers {
                        if export_name(&specifier.exported) == "default" {
                            self.default_local = Some(export_name(&specifier.local));
                        }
                    }
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                    push_id(&func.id, &mut names)
                }
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    push_id(&class.id, &mut names)
                }
                other => {
                    if let Some(Expression::Identifier(id)) = other.as_expression() {
                        self.default_local = Some(id.name.to_string());
                    }
                }
            },
            _ => {}
        }

        self.taken_names.extend(names);
    }

    fn statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::FunctionDeclaration(func) => self.function_declaration(func, None),
            Statement::ClassDeclaration(class) => self.class_declaration(class, None),
            Statement::VariableDeclaration(var) => self.variable_declaration(var, false),
            Statement::ExportNamedDeclaration(export) => self.export_named(export),
            Statement::ExportDefaultDeclaration(export) => self.export_default(export),
            _ => {}
        }
    }

    fn is_candidate(&self, name: &str) -> bool {
        is_component_name(name) || self.default_local.as_deref() == Some(name)
    }

    fn function_declaration(&mut self, func: &Function<'_>, export: Option<&str>) {
        let Some(id) = &func.id else {
            return;
        };
        let name = id.name.to_string();
        if !self.is_candidate(&name) && export != Some("default") {
            return;
        }
        let roots = RootFinder::new(self.source, self.options).function(func);
        let found = rendering(DeclarationShape::Function, roots);
        self.push_candidate(name.clone(), Some(name), found, export, func.span.start);
    }

    fn class_declaration(&mut self, class: &Class<'_>, export: Option<&str>) {
        let Some(id) = &class.id else {
            return;
        };
        let name = id.name.to_string();
        if !self.extends_component(class) {
            if export == Some("default") {
                self.push_candidate(name.clone(), Some(name), None, export, class.span.start);
            }
            return;
        }
        let roots = RootFinder::new(self.source, self.options).class(class);
        let found = rendering(DeclarationShape::Class, roots);
        self.push_candidate(name.clone(), Some(name), found, export, class.span.start);
    }

    fn variable_declaration(&mut self, var: &VariableDeclaration<'_>, exported: bool) {
        for decl in &var.declarations {
            if exported {
                let mut names = Vec::new();
                collect_binding_pattern(&decl.id, &mut names);
                for name in names {
                    self.exports.push(ExportBinding {
                        exported: name.clone(),
                        local: name,
                    });
                }
            }

            let BindingPattern::BindingIdentifier(id) = &decl.id else {
                continue;
            };
            let name = id.name.to_string();
            if !self.is_candidate(&name) {
                continue;
            }
            let Some(init) = &decl.init else {
                continue;
            };
            let found = self.expression_shape(init);
            let export = if exported { Some(name.as_str()) } else { None };
            self.push_candidate(name.clone(), Some(name.clone()), found, export, decl.span.start);
        }
    }

    fn export_named(&mut self, export: &ExportNamedDeclaration<'_>) {
        if export.source.is_some() {
            return;
        }

        match &export.declaration {
            Some(Declaration::FunctionDeclaration(func)) => {
                if let Some(id) = &func.id {
                    let name = id.name.to_string();
                    self.exports.push(ExportBinding {
                        exported: name.clone(),
                        local: name.clone(),
                    });
                    self.function_declaration(func, Some(&name));
                }
            }
            Some(Declaration::ClassDeclaration(class)) => {
                if let Some(id) = &class.id {
                    let name = id.name.to_string();
                    self.exports.push(ExportBinding {
                        exported: name.clone(),
                        local: name.clone(),
                    });
                    self.class_declaration(class, Some(&name));
                }
            }
            Some(Declaration::VariableDeclaration(var)) => self.variable_declaration(var, true),
            _ => {}
        }

        for specifier in &export.specifiers {
            let local = export_name(&specifier.local);
            let exported = export_name(&specifier.exported);
            self.exports.push(ExportBinding {
                exported: exported.clone(),
                local: local.clone(),
            });
            self.pending_exports.push((local, exported));
        }
    }

    fn export_default(&mut self, export: &ExportDefaultDeclaration<'_>) {
        match &export.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                if let Some(id) = &func.id {
                    self.export_default_named(id.name.as_str());
                    self.function_declaration(func, Some("default"));
                    return;
                }
                let alias = self.fresh_alias();
                let at = func
                    .type_parameters
                    .as_ref()
                    .map(|t| t.span.start)
                    .unwrap_or(func.params.span.start);
                let roots = RootFinder::new(self.source, self.options).function(func);
                let found = rendering(DeclarationShape::Function, roots)
                    .map(|(shape, plan)| (shape, self.with_alias_insert(plan, at, &alias)));
                self.push_anonymous_default(alias, found, export.span.start);
            }
            ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    self.export_default_named(id.name.as_str());
                    self.class_declaration(class, Some("default"));
                    return;
                }
                let alias = self.fresh_alias();
                let found = if self.extends_component(class) {
                    let roots = RootFinder::new(self.source, self.options).class(class);
                    let at = class_keyword_end(self.source, class);
                    rendering(DeclarationShape::Class, roots)
                        .map(|(shape, plan)| (shape, self.with_alias_insert(plan, at, &alias)))
                } else {
                    None
                };
                self.push_anonymous_default(alias, found, export.span.start);
            }
            other => {
                let Some(expr) = other.as_expression() else {
                    return;
                };
                if let Expression::Identifier(id) = unwrap_expression(expr) {
                    self.exports.push(ExportBinding {
                        exported: "default".to_string(),
                        local: id.name.to_string(),
                    });
                    self.pending_exports
                        .push((id.name.to_string(), "default".to_string()));
                    return;
                }

                let alias = self.fresh_alias();
                let found = self.expression_shape(expr).map(|(shape, mut plan)| {
                    plan.alias_edits.push(Edit::replace(
                        export.span.start,
                        expr.span().start,
                        format!("const {} = ", alias),
                    ));
                    let terminator = if self.source[..export.span.end as usize].ends_with(';') {
                        ""
                    } else {
                        ";"
                    };
                    plan.alias_edits.push(Edit::insert(
                        export.span.end,
                        format!("{}\nexport default {};", terminator, alias),
                    ));
                    (shape, plan)
                });
                self.push_anonymous_default(alias, found, export.span.start);
            }
        }
    }

    fn export_default_named(&mut self, name: &str) {
        self.exports.push(ExportBinding {
            exported: "default".to_string(),
            local: name.to_string(),
        });
    }

    fn push_anonymous_default(
        &mut self,
        alias: String,
        found: Option<(DeclarationShape, RenderPlan)>,
        offset: u32,
    ) {
        self.exports.push(ExportBinding {
            exported: "default".to_string(),
            local: alias.clone(),
        });
        self.push_candidate(alias, None, found, Some("default"), offset);
    }

    fn push_candidate(
        &mut self,
        binding: String,
        local_name: Option<String>,
        found: Option<(DeclarationShape, RenderPlan)>,
        export: Option<&str>,
        offset: u32,
    ) {
        self.candidates.push(Candidate {
            binding,
            local_name,
            found,
            is_default_export: export == Some("default"),
            exports: export.map(|e| vec![e.to_string()]).unwrap_or_default(),
            offset,
        });
    }

    fn with_alias_insert(&self, mut plan: RenderPlan, at: u32, alias: &str) -> RenderPlan {
        let preceded_by_space = self.source[..at as usize]
            .chars()
            .last()
            .map(char::is_whitespace)
            .unwrap_or(false);
        let text = if preceded_by_space {
            alias.to_string()
        } else {
            format!(" {}", alias)
        };
        plan.alias_edits.push(Edit::insert(at, text));
        plan
    }

    fn fresh_alias(&mut self) -> String {
        let mut alias = DEFAULT_EXPORT_ALIAS.to_string();
        let mut n = 1;
        while self.taken_names.contains(&alias) {
            alias = format!("{}_{}", DEFAULT_EXPORT_ALIAS, n);
            n += 1;
        }
        self.taken_names.insert(alias.clone());
        alias
    }

    fn extends_component(&self, class: &Class<'_>) -> bool {
        match class.super_class.as_ref().map(unwrap_expression) {
            Some(Expression::Identifier(id)) => self.options.is_component_base(id.name.as_str()),
            Some(Expression::StaticMemberExpression(member)) => {
                let property = member.property.name.as_str();
                let qualified = match &member.object {
                    Expression::Identifier(object) => format!("{}.{}", object.name, property),
                    _ => property.to_string(),
                };
                self.options.is_component_base(property)
                    || self.options.is_component_base(&qualified)
            }
            _ => false,
        }
    }

    fn expression_shape(&self, expr: &Expression<'_>) -> Option<(DeclarationShape, RenderPlan)> {
        match unwrap_expression(expr) {
            Expression::ArrowFunctionExpression(arrow) => rendering(
                DeclarationShape::Arrow,
                RootFinder::new(self.source, self.options).arrow(arrow),
            ),
            Expression::FunctionExpression(func) => rendering(
                DeclarationShape::Arrow,
                RootFinder::new(self.source, self.options).function(func),
            ),
            Expression::ClassExpression(class) if self.extends_component(class) => rendering(
                DeclarationShape::Class,
                RootFinder::new(self.source, self.options).class(class),
            ),
            Expression::CallExpression(call) => self
                .composed(call)
                .map(|plan| (DeclarationShape::Composed, plan)),
            _ => None,
        }
    }

    /// A binding this module already classified as rendering, or an imported
    /// component handed to a known composition wrapper.
    fn is_wrappable_reference(&self, name: &str, call: &CallExpression<'_>) -> bool {
        let classified = self
            .candidates
            .iter()
            .any(|c| c.binding == name && c.found.is_some());
        if classified {
            return true;
        }
        self.imported_components.contains(name)
            && callee_name(call)
                .map(|callee| self.options.is_composition_wrapper(&callee))
                .unwrap_or(false)
    }

    /// Finds what a higher-order call wraps: an inline renderer or a component
    /// reference. Outer call arguments win over curried inner ones.
    fn composed(&self, call: &CallExpression<'_>) -> Option<RenderPlan> {
        for argument in &call.arguments {
            let Some(expr) = argument.as_expression() else {
                continue;
            };
            match unwrap_expression(expr) {
                Expression::ArrowFunctionExpression(arrow) => {
                    let roots = RootFinder::new(self.source, self.options).arrow(arrow);
                    if roots.renders() {
                        return Some(RenderPlan::inline(roots));
                    }
                }
                Expression::FunctionExpression(func) => {
                    let roots = RootFinder::new(self.source, self.options).function(func);
                    if roots.renders() {
                        return Some(RenderPlan::inline(roots));
                    }
                }
                Expression::ClassExpression(class) if self.extends_component(class) => {
                    let roots = RootFinder::new(self.source, self.options).class(class);
                    if roots.renders() {
                        return Some(RenderPlan::inline(roots));
                    }
                }
                Expression::Identifier(id) if self.is_wrappable_reference(id.name.as_str(), call) => {
                    return Some(RenderPlan {
                        wrapped_reference: Some((id.span.start, id.span.end)),
                        ..Default::default()
                    });
                }
                Expression::CallExpression(inner) => {
                    if let Some(plan) = self.composed(inner) {
                        return Some(plan);
                    }
                }
                _ => {}
            }
        }

        match unwrap_expression(&call.callee) {
            Expression::CallExpression(callee) => self.composed(callee),
            _ => None,
        }
    }

    fn finish(mut self) -> ModuleClassification {
        for (local, exported) in std::mem::take(&mut self.pending_exports) {
            if let Some(candidate) = self.candidates.iter_mut().find(|c| c.binding == local) {
                if exported == "default" {
                    candidate.is_default_export = true;
                }
                if !candidate.exports.contains(&exported) {
                    candidate.exports.push(exported);
                }
            }
        }

        let declarations = self
            .candidates
            .into_iter()
            .map(|candidate| classify_candidate(candidate, self.source, self.module_path))
            .collect();

        ModuleClassification {
            module_path: self.module_path.to_string(),
            declarations,
            exports: self.exports,
            parse_errors: Vec::new(),
        }
    }
}

impl RenderPlan {
    fn inline(roots: RenderRoots) -> Self {
        RenderPlan {
            roots,
            ..Default::default()
        }
    }
}

fn classify_candidate(candidate: Candidate, source: &str, module_path: &str) -> Classification {
    let location = SourceLocation::from_offset(source, candidate.offset);
    let skip = |reason| {
        Classification::Unsupported(UnsupportedDeclaration {
            binding: candidate.binding.clone(),
            reason,
            location: location.clone(),
        })
    };

    let Some((shape, plan)) = candidate.found else {
        return skip(SkipReason::UnrecognizedShape);
    };
    if !plan.roots.conflicts.is_empty() {
        return skip(SkipReason::AttributeConflict);
    }
    if plan.roots.inserts.is_empty() && plan.wrapped_reference.is_none() {
        return skip(SkipReason::NoTaggableRoot);
    }

    let kind = match (candidate.is_default_export, &candidate.local_name, shape) {
        (true, Some(_), _) => ComponentKind::DefaultExportNamed,
        (true, None, _) => ComponentKind::DefaultExportAnonymous,
        (false, _, DeclarationShape::Function) => ComponentKind::FunctionDeclaration,
        (false, _, DeclarationShape::Arrow) => ComponentKind::ArrowFunctionComponent,
        (false, _, DeclarationShape::Class) => ComponentKind::ClassComponent,
        (false, _, DeclarationShape::Composed) => ComponentKind::ComposedComponent,
    };

    Classification::Component(ComponentDeclaration {
        kind,
        shape,
        local_name: candidate.local_name,
        binding: candidate.binding,
        is_default_export: candidate.is_default_export,
        exports: candidate.exports,
        source_module_path: module_path.to_string(),
        location,
        plan,
    })
}

fn rendering(shape: DeclarationShape, roots: RenderRoots) -> Option<(DeclarationShape, RenderPlan)> {
    if roots.renders() {
        Some((shape, RenderPlan::inline(roots)))
    } else {
        None
    }
}

fn unwrap_expression<'b, 'a>(expr: &'b Expression<'a>) -> &'b Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(paren) => unwrap_expression(&paren.expression),
        Expression::TSAsExpression(as_expr) => unwrap_expression(&as_expr.expression),
        Expression::TSSatisfiesExpression(sat) => unwrap_expression(&sat.expression),
        Expression::TSNonNullExpression(nn) => unwrap_expression(&nn.expression),
        _ => expr,
    }
}

/// Root function of a possibly curried call: `connect` for `connect(a)(B)`,
/// `React.memo` for `React.memo(B)`.
fn callee_name(call: &CallExpression<'_>) -> Option<String> {
    match unwrap_expression(&call.callee) {
        Expression::Identifier(id) => Some(id.name.to_string()),
        Expression::StaticMemberExpression(member) => Some(match &member.object {
            Expression::Identifier(object) => format!("{}.{}", object.name, member.property.name),
            _ => member.property.name.to_string(),
        }),
        Expression::CallExpression(inner) => callee_name(inner),
        _ => None,
    }
}

/// Offset just past the `class` keyword, skipping any decorators.
fn class_keyword_end(source: &str, class: &Class<'_>) -> u32 {
    let from = class
        .decorators
        .iter()
        .map(|d| d.span.end)
        .max()
        .unwrap_or(class.span.start)
        .max(class.span.start);
    let keyword = source[from as usize..class.body.span.start as usize]
        .find("class")
        .unwrap_or(0) as u32;
    from + keyword + "class".len() as u32
}

fn is_component_name(name: &str) -> bool {
    name.chars().next().map(|c| c.is_ascii_uppercase()).unwrap_or(false)
}

fn push_id(id: &Option<BindingIdentifier<'_>>, names: &mut Vec<String>) {
    if let Some(id) = id {
        names.push(id.name.to_string());
    }
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.to_string(),
        ModuleExportName::IdentifierReference(id) => id.name.to_string(),
        ModuleExportName::StringLiteral(s) => s.value.to_string(),
    }
}

fn collect_binding_pattern(pattern: &BindingPattern<'_>, names: &mut Vec<String>) {
    match pattern {
        BindingPattern::BindingIdentifier(id) => names.push(id.name.to_string()),
        BindingPattern::ObjectPattern(obj) => {
            for prop in &obj.properties {
                collect_binding_pattern(&prop.value, names);
            }
            if let Some(rest) = &obj.rest {
                collect_binding_pattern(&rest.argument, names);
            }
        }
        BindingPattern::ArrayPattern(arr) => {
            for elem in arr.elements.iter().flatten() {
                collect_binding_pattern(elem, names);
            }
            if let Some(rest) = &arr.rest {
                collect_binding_pattern(&rest.argument, names);
            }
        }
        _ => {}
    }
}
