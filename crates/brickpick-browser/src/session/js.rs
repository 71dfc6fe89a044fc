//! JavaScript evaluation and DOM reads.
//!
//! Everything the scraper observes about page state flows through
//! `Runtime.evaluate`. Selectors are embedded as JSON string literals so
//! quoting in the page cannot break out of the expression.

use serde_json::{Value, json};

use super::PageSession;
use crate::error::BrowserError;

/// Quote a string as a JavaScript literal.
pub(crate) fn js_str(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, BrowserError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("Unknown error");
            return Err(BrowserError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Whether any element matches the selector.
    pub async fn exists(&self, selector: &str) -> Result<bool, BrowserError> {
        let expr = format!("document.querySelector({}) !== null", js_str(selector));
        Ok(self.evaluate(&expr).await?.as_bool().unwrap_or(false))
    }

    /// Rendered text of the first matching element, if present.
    pub async fn inner_text(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        let expr = format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.innerText : null; }})()",
            js_str(selector)
        );
        Ok(self.evaluate(&expr).await?.as_str().map(str::to_string))
    }

    /// Outer HTML of the first matching element, if present.
    pub async fn outer_html(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        let expr = format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.outerHTML : null; }})()",
            js_str(selector)
        );
        Ok(self.evaluate(&expr).await?.as_str().map(str::to_string))
    }

    /// Attribute value of the first matching element.
    pub async fn attribute(
        &self,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        let expr = format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.getAttribute({}) : null; }})()",
            js_str(selector),
            js_str(name)
        );
        Ok(self.evaluate(&expr).await?.as_str().map(str::to_string))
    }

    /// Whether the element is absent or not rendered. Used for indicators
    /// that toggle `display: none` rather than leaving the DOM.
    pub async fn is_hidden(&self, selector: &str) -> Result<bool, BrowserError> {
        let expr = format!(
            "(() => {{ \
                const el = document.querySelector({}); \
                if (!el) return true; \
                const style = window.getComputedStyle(el); \
                return style.display === 'none' || style.visibility === 'hidden'; \
             }})()",
            js_str(selector)
        );
        Ok(self.evaluate(&expr).await?.as_bool().unwrap_or(true))
    }

    /// Set a `<select>` element's value and fire its change event.
    pub async fn select_value(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        let expr = format!(
            "(() => {{ \
                const el = document.querySelector({sel}); \
                if (!el) return false; \
                el.value = {val}; \
                el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                return true; \
             }})()",
            sel = js_str(selector),
            val = js_str(value),
        );
        let changed = self.evaluate(&expr).await?.as_bool().unwrap_or(false);
        if !changed {
            return Err(BrowserError::ElementNotFound(selector.to_string()));
        }
        Ok(())
    }
}
