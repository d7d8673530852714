//! Semantic element queries, resolved inside the page.
//!
//! A `Locator` names an element the way the UI presents it (accessible
//! role plus visible name, or a form control's label text) and renders to
//! a JavaScript expression that evaluates to the matching element or
//! `null`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Accessible role with an exact accessible name, e.g. a "Sign In" link.
    Role { role: String, name: String },
    /// Form control associated with a `<label>` carrying this exact text.
    Label(String),
}

impl Locator {
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// JavaScript expression resolving to the first visible match, or `null`.
    pub(crate) fn query_js(&self) -> String {
        match self {
            Locator::Role { role, name } => format!(
                r#"(function() {{
                    const wanted = '{name}';
                    const norm = (s) => (s || '').replace(/\s+/g, ' ').trim();
                    const accName = (el) =>
                        norm(el.getAttribute('aria-label') || el.innerText || el.textContent || el.value);
                    const visible = (el) => {{
                        const rect = el.getBoundingClientRect();
                        return rect.width > 0 && rect.height > 0;
                    }};
                    const nodes = Array.from(document.querySelectorAll('{css}'));
                    return nodes.find((el) => visible(el) && accName(el) === wanted) || null;
                }})()"#,
                name = js_string(name),
                css = role_css(role),
            ),
            Locator::Label(text) => format!(
                r#"(function() {{
                    const wanted = '{text}';
                    const norm = (s) => (s || '').replace(/\s+/g, ' ').trim();
                    const labels = Array.from(document.querySelectorAll('label'));
                    const label = labels.find((l) => norm(l.textContent) === wanted);
                    if (label) {{
                        if (label.htmlFor) {{
                            const byId = document.getElementById(label.htmlFor);
                            if (byId) return byId;
                        }}
                        const nested = label.querySelector('input, textarea, select');
                        if (nested) return nested;
                    }}
                    const controls = Array.from(document.querySelectorAll('input, textarea, select'));
                    return controls.find((el) => norm(el.getAttribute('aria-label')) === wanted) || null;
                }})()"#,
                text = js_string(text),
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Role { role, name } => write!(f, "{} \"{}\"", role, name),
            Locator::Label(text) => write!(f, "label \"{}\"", text),
        }
    }
}

// CSS candidates for an accessible role. The selector list is embedded in
// a single-quoted JS string, so attribute values use double quotes.
fn role_css(role: &str) -> String {
    match role {
        "link" => r#"a[href], [role="link"]"#.to_string(),
        "button" => {
            r#"button, [role="button"], input[type="submit"], input[type="button"]"#.to_string()
        }
        "textbox" => {
            r#"input:not([type]), input[type="text"], input[type="email"], input[type="password"], textarea"#
                .to_string()
        }
        other => format!(r#"[role="{}"]"#, other),
    }
}

/// Escapes a Rust string for embedding in a single-quoted JS literal.
pub(crate) fn js_string(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_role_queries_anchors() {
        let query = Locator::role("link", "Sign In").query_js();
        assert!(query.contains("a[href]"));
        assert!(query.contains(r#"[role="link"]"#));
        assert!(query.contains("const wanted = 'Sign In'"));
    }

    #[test]
    fn button_role_includes_submit_inputs() {
        let query = Locator::role("button", "Generate Study Path").query_js();
        assert!(query.contains(r#"input[type="submit"]"#));
        assert!(query.contains("Generate Study Path"));
    }

    #[test]
    fn unknown_roles_fall_back_to_the_role_attribute() {
        let query = Locator::role("tab", "Overview").query_js();
        assert!(query.contains(r#"[role="tab"]"#));
    }

    #[test]
    fn label_query_resolves_for_attribute_and_nesting() {
        let query = Locator::label("Email").query_js();
        assert!(query.contains("label.htmlFor"));
        assert!(query.contains("label.querySelector"));
        assert!(query.contains("aria-label"));
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let query = Locator::role("link", "Bob's page").query_js();
        assert!(query.contains("Bob\\'s page"));

        assert_eq!(js_string(r"a\b"), r"a\\b");
        assert_eq!(js_string("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn display_names_the_target() {
        assert_eq!(
            Locator::role("link", "Sign In").to_string(),
            "link \"Sign In\""
        );
        assert_eq!(Locator::label("Password").to_string(), "label \"Password\"");
    }
}
