//! Native mouse and keyboard input.
//!
//! Clicks are dispatched as trusted input events at the center of the
//! element's box model, and form fields are filled through focus +
//! select-all + insert, so the page's own event handlers fire exactly as
//! they would for a human operator.

use serde_json::json;
use tracing::debug;

use super::PageSession;
use crate::error::BrowserError;
use crate::protocol::{BoxModel, KeyEventType, MouseButton, MouseEventType};

impl PageSession {
    /// Node id of the first element matching the selector.
    pub async fn query_selector(&self, selector: &str) -> Result<Option<i64>, BrowserError> {
        let doc = self.call("DOM.getDocument", Some(json!({"depth": 0}))).await?;
        let root_id = doc["root"]["nodeId"]
            .as_i64()
            .ok_or_else(|| BrowserError::InvalidResponse("Missing document root".to_string()))?;

        let result = self
            .call(
                "DOM.querySelector",
                Some(json!({"nodeId": root_id, "selector": selector})),
            )
            .await?;

        match result["nodeId"].as_i64() {
            Some(0) | None => Ok(None),
            Some(node_id) => Ok(Some(node_id)),
        }
    }

    /// Box model for a node; `None` when the node is not rendered.
    pub async fn box_model(&self, node_id: i64) -> Result<Option<BoxModel>, BrowserError> {
        let result = self
            .call("DOM.getBoxModel", Some(json!({"nodeId": node_id})))
            .await;

        match result {
            Ok(r) => Ok(Some(serde_json::from_value(r["model"].clone())?)),
            Err(BrowserError::Protocol { code: -32000, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Click at page coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), BrowserError> {
        for event_type in [MouseEventType::MousePressed, MouseEventType::MouseReleased] {
            self.call(
                "Input.dispatchMouseEvent",
                Some(json!({
                    "type": event_type,
                    "x": x,
                    "y": y,
                    "button": MouseButton::Left,
                    "clickCount": 1,
                })),
            )
            .await?;
        }
        debug!("Clicked at ({x}, {y})");
        Ok(())
    }

    /// Click the center of the first element matching the selector.
    pub async fn click_selector(&self, selector: &str) -> Result<(), BrowserError> {
        let node_id = self
            .query_selector(selector)
            .await?
            .ok_or_else(|| BrowserError::ElementNotFound(selector.to_string()))?;

        let model = self
            .box_model(node_id)
            .await?
            .ok_or_else(|| BrowserError::ElementNotFound(format!("{selector} (not visible)")))?;

        let (x, y) = quad_center(&model.content);
        self.click(x, y).await
    }

    /// Focus an element.
    pub async fn focus(&self, node_id: i64) -> Result<(), BrowserError> {
        self.call("DOM.focus", Some(json!({"nodeId": node_id})))
            .await?;
        Ok(())
    }

    /// Insert text at the current focus.
    pub async fn type_text(&self, text: &str) -> Result<(), BrowserError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        Ok(())
    }

    /// Replace the value of an input field.
    pub async fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        let node_id = self
            .query_selector(selector)
            .await?
            .ok_or_else(|| BrowserError::ElementNotFound(selector.to_string()))?;

        self.focus(node_id).await?;
        self.press_key_with_modifiers("a", MODIFIER_CTRL).await?;
        self.type_text(value).await?;
        debug!("Filled {selector} ({} chars)", value.len());
        Ok(())
    }

    /// Press and release a key.
    pub async fn press_key(&self, key: &str) -> Result<(), BrowserError> {
        self.press_key_with_modifiers(key, 0).await
    }

    async fn press_key_with_modifiers(&self, key: &str, modifiers: i32) -> Result<(), BrowserError> {
        for event_type in [KeyEventType::KeyDown, KeyEventType::KeyUp] {
            self.call(
                "Input.dispatchKeyEvent",
                Some(json!({
                    "type": event_type,
                    "key": key,
                    "modifiers": modifiers,
                })),
            )
            .await?;
        }
        Ok(())
    }
}

pub(crate) const MODIFIER_CTRL: i32 = 2;

/// Center point of an (x, y) quad.
fn quad_center(quad: &[f64]) -> (f64, f64) {
    if quad.len() >= 8 {
        let x = (quad[0] + quad[2] + quad[4] + quad[6]) / 4.0;
        let y = (quad[1] + quad[3] + quad[5] + quad[7]) / 4.0;
        (x, y)
    } else {
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_center() {
        let quad = [10.0, 20.0, 110.0, 20.0, 110.0, 60.0, 10.0, 60.0];
        assert_eq!(quad_center(&quad), (60.0, 40.0));
    }

    #[test]
    fn test_quad_center_short_quad() {
        assert_eq!(quad_center(&[1.0, 2.0]), (0.0, 0.0));
    }
}
