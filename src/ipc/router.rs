use super::handlers;
use super::types::Request;
use crate::ipc::error::err;

pub fn handle_request(req: &Request) -> serde_json::Value {
    if let Some(resp) = handlers::core::try_handle(req) {
        return resp;
    }
    if let Some(resp) = handlers::grades::try_handle(req) {
        return resp;
    }
    if let Some(resp) = handlers::attendance::try_handle(req) {
        return resp;
    }
    if let Some(resp) = handlers::fees::try_handle(req) {
        return resp;
    }
    if let Some(resp) = handlers::reports::try_handle(req) {
        return resp;
    }

    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
