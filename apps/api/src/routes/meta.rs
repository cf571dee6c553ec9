use axum::Json;
use serde_json::{json, Value};

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Civic Complaints API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "complaints": "/complaints",
            "impact": "/impact",
            "representatives": "/representatives",
            "teams": "/teams"
        }
    }))
}

/// GET /about
/// Static marketing copy; the live numbers come from /impact.
pub async fn about_handler() -> Json<Value> {
    Json(json!({
        "title": "Community Powered — About Clean Karachi",
        "mission": {
            "headline": "Empowering Citizens, Transforming Karachi",
            "body": "Clean Karachi turns complaints into action and frustration into solutions.",
            "highlights": [
                {"label": "Issues Resolved", "value": "15,000+"},
                {"label": "Areas Covered", "value": "200+"},
                {"label": "Faster Resolution", "value": "72%"}
            ]
        },
        "vision": "A Karachi where every street is clean and every citizen can maintain the beauty of our city.",
        "sla": {"avg_resolution_time": "48 hours"}
    }))
}
