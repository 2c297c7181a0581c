//! Render-root discovery.
//!
//! Finds the JSX nodes a rendering function can return and decides where the
//! marker attribute goes on each of them. Only the function's own return
//! statements count; nested functions and classes are not entered.

use oxc_ast::ast::*;
use oxc_ast_visit::Visit;
use oxc_syntax::scope::ScopeFlags;

use crate::config::TransformOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RenderRoots {
    /// Byte offsets where the marker attribute is inserted.
    pub inserts: Vec<u32>,
    /// Start offsets of roots that already carry the reserved attribute.
    pub conflicts: Vec<u32>,
    /// Roots with nothing to tag (wrappers grouping several children, bare text).
    pub untaggable: usize,
}

impl RenderRoots {
    pub fn renders(&self) -> bool {
        !self.inserts.is_empty() || !self.conflicts.is_empty() || self.untaggable > 0
    }
}

pub(crate) struct RootFinder<'s> {
    source: &'s str,
    options: &'s TransformOptions,
    roots: RenderRoots,
}

impl<'s> RootFinder<'s> {
    pub fn new(source: &'s str, options: &'s TransformOptions) -> Self {
        Self {
            source,
            options,
            roots: RenderRoots::default(),
        }
    }

    pub fn function(mut self, func: &Function<'_>) -> RenderRoots {
        if let Some(body) = &func.body {
            self.visit_function_body(body);
        }
        self.roots
    }

    pub fn arrow(mut self, arrow: &ArrowFunctionExpression<'_>) -> RenderRoots {
        if arrow.expression {
            if let Some(Statement::ExpressionStatement(stmt)) = arrow.body.statements.first() {
                self.root_expression(&stmt.expression);
            }
        } else {
            self.visit_function_body(&arrow.body);
        }
        self.roots
    }

    /// Roots of a class component's `render` method or `render = () => ...` field.
    pub fn class(mut self, class: &Class<'_>) -> RenderRoots {
        for element in &class.body.body {
            match element {
                ClassElement::MethodDefinition(method) => {
                    if !method.r#static && is_render_key(&method.key) {
                        if let Some(body) = &method.value.body {
                            self.visit_function_body(body);
                        }
                    }
                }
                ClassElement::PropertyDefinition(prop) => {
                    if prop.r#static || !is_render_key(&prop.key) {
                        continue;
                    }
                    match &prop.value {
                        Some(Expression::ArrowFunctionExpression(arrow)) => {
                            let inner = RootFinder::new(self.source, self.options).arrow(arrow);
                            self.merge(inner);
                        }
                        Some(Expression::FunctionExpression(func)) => {
                            let inner = RootFinder::new(self.source, self.options).function(func);
                            self.merge(inner);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
        self.roots
    }

    fn merge(&mut self, other: RenderRoots) {
        self.roots.inserts.extend(other.inserts);
        self.roots.conflicts.extend(other.conflicts);
        self.roots.untaggable += other.untaggable;
    }

    fn root_expression(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::JSXElement(element) => self.root_element(element),
            Expression::JSXFragment(fragment) => self.wrapped_children(&fragment.children),
            Expression::ParenthesizedExpression(paren) => self.root_expression(&paren.expression),
            Expression::ConditionalExpression(cond) => {
                self.root_expression(&cond.consequent);
                self.root_expression(&cond.alternate);
            }
            Expression::LogicalExpression(logical) => {
                self.root_expression(&logical.left);
                self.root_expression(&logical.right);
            }
            _ => {}
        }
    }

    fn root_element(&mut self, element: &JSXElement<'_>) {
        let name = element_name(&element.opening_element.name);
        if self.options.is_transparent_wrapper(&name) {
            self.wrapped_children(&element.children);
            return;
        }

        let reserved = self.options.attribute_name.as_str();
        let has_reserved = element.opening_element.attributes.iter().any(|item| match item {
            JSXAttributeItem::Attribute(attr) => attribute_name(&attr.name) == reserved,
            JSXAttributeItem::SpreadAttribute(_) => false,
        });

        if has_reserved {
            self.roots.conflicts.push(element.span.start);
        } else {
            self.roots
                .inserts
                .push(self.insert_offset(element.opening_element.span.start, element.opening_element.span.end));
        }
    }

    /// A transparent wrapper passes the marker through only when it wraps a
    /// single meaningful child.
    fn wrapped_children(&mut self, children: &[JSXChild<'_>]) {
        let meaningful: Vec<&JSXChild<'_>> = children
            .iter()
            .filter(|child| match child {
                JSXChild::Text(text) => !text.value.trim().is_empty(),
                JSXChild::ExpressionContainer(container) => {
                    !matches!(container.expression, JSXExpression::EmptyExpression(_))
                }
                _ => true,
            })
            .collect();

        if meaningful.len() != 1 {
            self.roots.untaggable += 1;
            return;
        }

        match meaningful[0] {
            JSXChild::Element(element) => self.root_element(element),
            JSXChild::Fragment(fragment) => self.wrapped_children(&fragment.children),
            JSXChild::ExpressionContainer(container) => {
                let before = self.roots.inserts.len() + self.roots.conflicts.len();
                if let Some(expr) = container.expression.as_expression() {
                    self.root_expression(expr);
                }
                if self.roots.inserts.len() + self.roots.conflicts.len() == before {
                    self.roots.untaggable += 1;
                }
            }
            _ => self.roots.untaggable += 1,
        }
    }

    /// Position right after the last attribute or spread of an opening tag,
    /// ahead of any whitespace before `>` or `/>`.
    fn insert_offset(&self, start: u32, end: u32) -> u32 {
        let tag = &self.source[start as usize..end as usize];
        let head = tag
            .strip_suffix("/>")
            .or_else(|| tag.strip_suffix('>'))
            .unwrap_or(tag);
        start + head.trim_end().len() as u32
    }
}

impl<'a> Visit<'a> for RootFinder<'_> {
    fn visit_return_statement(&mut self, stmt: &ReturnStatement<'a>) {
        if let Some(argument) = &stmt.argument {
            self.root_expression(argument);
        }
    }

    fn visit_function(&mut self, _func: &Function<'a>, _flags: ScopeFlags) {}

    fn visit_arrow_function_expression(&mut self, _arrow: &ArrowFunctionExpression<'a>) {}

    fn visit_class(&mut self, _class: &Class<'a>) {}
}

fn is_render_key(key: &PropertyKey<'_>) -> bool {
    match key {
        PropertyKey::StaticIdentifier(id) => id.name.as_str() == "render",
        _ => false,
    }
}

fn attribute_name(name: &JSXAttributeName<'_>) -> String {
    match name {
        JSXAttributeName::Identifier(id) => id.name.to_string(),
        JSXAttributeName::NamespacedName(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
    }
}

pub(crate) fn element_name(name: &JSXElementName<'_>) -> String {
    match name {
        JSXElementName::Identifier(id) => id.name.to_string(),
        JSXElementName::IdentifierReference(id) => id.name.to_string(),
        JSXElementName::NamespacedName(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
        JSXElementName::MemberExpression(me) => member_name(me),
        JSXElementName::ThisExpression(_) => "this".to_string(),
    }
}

fn member_name(me: &JSXMemberExpression<'_>) -> String {
    let object = match &me.object {
        JSXMemberExpressionObject::IdentifierReference(id) => id.name.to_string(),
        JSXMemberExpressionObject::MemberExpression(inner) => member_name(inner),
        _ => "this".to_string(),
    };
    format!("{}.{}", object, me.property.name)
}
