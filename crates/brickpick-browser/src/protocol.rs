//! CDP wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CDP request message.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP response or event message.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP error in a response.
#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
}

/// Page info from the `/json` discovery endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub page_type: String,
    pub title: String,
    pub url: String,
    pub web_socket_debugger_url: Option<String>,
}

/// Browser version info.
///
/// Note: Chrome returns PascalCase field names for this endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// Box model for a DOM node; quads are 8-element (x, y) point lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxModel {
    pub content: Vec<f64>,
    pub width: i64,
    pub height: i64,
}

/// Mouse button.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
}

/// Mouse event type.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    MousePressed,
    MouseReleased,
}

/// Key event type.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyEventType {
    KeyDown,
    KeyUp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization_skips_absent_fields() {
        let request = CdpRequest {
            id: 1,
            method: "Page.enable".to_string(),
            params: None,
            session_id: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("params"));
        assert!(!json.contains("sessionId"));
    }

    #[test]
    fn test_request_serialization_with_session() {
        let request = CdpRequest {
            id: 7,
            method: "Runtime.evaluate".to_string(),
            params: Some(json!({"expression": "1 + 1"})),
            session_id: Some("ABCDEF".to_string()),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"sessionId\":\"ABCDEF\""));
        assert!(json.contains("1 + 1"));
    }

    #[test]
    fn test_response_deserialization() {
        let raw = r#"{"id": 3, "result": {"value": 2}}"#;
        let resp: CdpResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.id, Some(3));
        assert!(resp.error.is_none());
        assert!(resp.method.is_none());
    }

    #[test]
    fn test_event_deserialization() {
        let raw = r#"{"method": "Page.loadEventFired", "params": {}, "sessionId": "S1"}"#;
        let resp: CdpResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.id, None);
        assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
        assert_eq!(resp.session_id.as_deref(), Some("S1"));
    }

    #[test]
    fn test_error_response_deserialization() {
        let raw = r#"{"id": 9, "error": {"code": -32601, "message": "method not found"}}"#;
        let resp: CdpResponse = serde_json::from_str(raw).unwrap();
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "method not found");
    }

    #[test]
    fn test_browser_version_pascal_case() {
        let raw = r#"{
            "Browser": "Chrome/131.0.0.0",
            "Protocol-Version": "1.3",
            "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/x"
        }"#;
        let version: BrowserVersion = serde_json::from_str(raw).unwrap();
        assert!(version.browser.starts_with("Chrome"));
        assert!(version.web_socket_debugger_url.starts_with("ws://"));
    }

    #[test]
    fn test_mouse_event_type_wire_names() {
        assert_eq!(
            serde_json::to_value(MouseEventType::MousePressed).unwrap(),
            json!("mousePressed")
        );
        assert_eq!(
            serde_json::to_value(MouseEventType::MouseReleased).unwrap(),
            json!("mouseReleased")
        );
        assert_eq!(serde_json::to_value(MouseButton::Left).unwrap(), json!("left"));
    }
}
