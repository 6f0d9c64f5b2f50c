use pong_client::{ApiRequest, ClientConfig, ClientError, JSON_CONTENT_TYPE};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

/// Perform one request with `fetch` and return the reply body.
///
/// Non-2xx statuses are errors. There is no retry and no timeout.
pub async fn send(config: &ClientConfig, request: &ApiRequest) -> Result<String, ClientError> {
    let url = config.url(&request.call.path());

    let init = RequestInit::new();
    init.set_method(request.call.method().as_str());
    init.set_mode(RequestMode::Cors);
    if let Some(body) = request.call.body()? {
        let headers = Headers::new().map_err(network)?;
        headers
            .set("Content-Type", JSON_CONTENT_TYPE)
            .map_err(network)?;
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
    }

    let fetch_request = Request::new_with_str_and_init(&url, &init).map_err(network)?;
    let window = web_sys::window().ok_or_else(|| ClientError::Network("no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&fetch_request))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;

    if !response.ok() {
        return Err(ClientError::Status(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?;
    text.as_string()
        .ok_or_else(|| ClientError::Decode("reply body is not text".into()))
}

fn network(e: JsValue) -> ClientError {
    let msg = e
        .as_string()
        .or_else(|| {
            e.dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{:?}", e));
    ClientError::Network(msg)
}
