use std::sync::Arc;
use std::time::{Duration, SystemTime};

use restchain::prelude::*;
use restchain_client::error;
use serde::{Deserialize, Serialize};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn entry(transport: &Arc<MockTransport>) -> HttpMethodBuilder {
    init_logging();
    HttpMethodBuilder::new("http://users.svc", Arc::clone(transport))
        .unwrap()
        .debug()
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u64,
}

#[derive(Debug, Serialize)]
struct NewUser<'a> {
    name: &'a str,
}

#[test]
fn test_get_with_accept_decodes_json() {
    let transport = Arc::new(
        MockTransport::new().reply(RawResponse::json(StatusCode::OK, r#"{"id":42}"#)),
    );

    let response = entry(&transport)
        .get()
        .with_target("/users/42")
        .with_headers()
        .accept([ContentType::ApplicationJson])
        .and_execute_for()
        .execute()
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<User>().unwrap(), User { id: 42 });
    assert_eq!(response.json_value().unwrap(), serde_json::json!({ "id": 42 }));

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method(), &Method::GET);
    assert_eq!(sent.url().as_str(), "http://users.svc/users/42");
    assert_eq!(sent.headers()["accept"], "application/json");
    assert!(sent.body().is_none());
}

#[test]
fn test_post_sends_body_once() {
    let transport = Arc::new(MockTransport::new().reply(RawResponse::new(StatusCode::CREATED)));

    let response = entry(&transport)
        .post()
        .with_target("/users")
        .with_body(&NewUser { name: "ada" })
        .execute()
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(transport.calls(), 1);

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method(), &Method::POST);
    assert_eq!(sent.url().path(), "/users");
    assert_eq!(sent.body().unwrap().as_ref(), br#"{"name":"ada"}"#);
    assert_eq!(sent.headers()["content-type"], "application/json");
}

#[test]
fn test_post_without_body_is_valid() {
    let transport = Arc::new(MockTransport::new());

    entry(&transport)
        .post()
        .with_target("/jobs/run")
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert!(sent.body().is_none());
    assert!(sent.headers().get("content-type").is_none());
}

#[test]
fn test_head_ping() {
    let transport = Arc::new(MockTransport::new().reply(
        RawResponse::new(StatusCode::OK).with_header(
            HeaderName::from_static("x-alive"),
            HeaderValue::from_static("yes"),
        ),
    ));

    let headers = entry(&transport)
        .head()
        .with_target("/ping")
        .headers_only()
        .unwrap();

    assert_eq!(headers["x-alive"], "yes");
    assert_eq!(transport.last_request().unwrap().method(), &Method::HEAD);
}

#[test]
fn test_every_verb_reaches_transport() {
    let transport = Arc::new(MockTransport::new());
    let methods = entry(&transport);

    methods.get().with_target("/r").ignoring_response().unwrap();
    methods.post().with_target("/r").ignoring_response().unwrap();
    methods.put().with_target("/r").ignoring_response().unwrap();
    methods.delete().with_target("/r").ignoring_response().unwrap();
    methods.head().with_target("/r").ignoring_response().unwrap();
    methods.options().with_target("/r").ignoring_response().unwrap();

    let sent: Vec<Method> = transport
        .requests()
        .iter()
        .map(|r| r.method().clone())
        .collect();
    assert_eq!(
        sent,
        [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS
        ]
    );
}

#[test]
fn test_missing_target_never_calls_transport() {
    let transport = Arc::new(MockTransport::new());
    let methods = entry(&transport);

    let err = methods.get().execute().unwrap_err();
    assert!(err.is_invalid_request());

    let err = methods.post().with_target("   ").execute().unwrap_err();
    assert!(err.is_invalid_request());

    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_typed_setters_last_value_wins() {
    let transport = Arc::new(MockTransport::new());

    entry(&transport)
        .get()
        .with_target("/cache")
        .with_headers()
        .cache_control("no-cache")
        .accept(["text/plain"])
        .cache_control("no-store")
        .accept([ContentType::ApplicationJson])
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    let cache: Vec<_> = sent.headers().get_all("cache-control").iter().collect();
    assert_eq!(cache, ["no-store"]);
    assert_eq!(sent.headers()["accept"], "application/json");
}

#[test]
fn test_generic_header_appends() {
    let transport = Arc::new(MockTransport::new());

    entry(&transport)
        .get()
        .with_target("/tags")
        .with_headers()
        .header("x-tag", "a")
        .header("X-Tag", "b")
        .and_execute_for()
        .with_headers()
        .header("x-tag", "c")
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    let tags: Vec<_> = sent.headers().get_all("x-tag").iter().collect();
    assert_eq!(tags, ["a", "b", "c"]);
}

#[test]
fn test_bulk_headers_overwrite() {
    let transport = Arc::new(MockTransport::new());
    let mut replacement = HeaderMap::new();
    replacement.insert("x-only", HeaderValue::from_static("1"));

    entry(&transport)
        .get()
        .with_target("/bulk")
        .with_headers()
        .header("x-tag", "a")
        .header("x-tag", "b")
        .headers([("x-tag", "c"), ("x-other", "d")])
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    let tags: Vec<_> = sent.headers().get_all("x-tag").iter().collect();
    assert_eq!(tags, ["c"]);
    assert_eq!(sent.headers()["x-other"], "d");

    entry(&transport)
        .get()
        .with_target("/bulk")
        .with_headers()
        .header("x-tag", "a")
        .header_map(replacement)
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert!(sent.headers().get("x-tag").is_none());
    assert_eq!(sent.headers()["x-only"], "1");
    assert_eq!(sent.headers().len(), 1);
}

#[test]
fn test_raw_and_typed_content_type_are_equivalent() {
    let transport = Arc::new(MockTransport::new());
    let methods = entry(&transport);

    methods
        .put()
        .with_target("/doc")
        .with_headers()
        .content_type(ContentType::ApplicationXml)
        .and_execute_for()
        .with_text_body("<doc/>")
        .ignoring_response()
        .unwrap();

    methods
        .put()
        .with_target("/doc")
        .with_text_body("<doc/>")
        .with_headers()
        .content_type_str("application/xml")
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
    assert_eq!(requests[0].headers()["content-type"], "application/xml");
}

#[test]
fn test_header_stage_writes_through() {
    let transport = Arc::new(MockTransport::new());

    let stage = entry(&transport)
        .get()
        .with_target("/x")
        .with_headers()
        .user_agent("restchain-test")
        .max_age(60);

    assert_eq!(stage.current().get("user-agent"), Some("restchain-test"));
    assert_eq!(stage.current().get("cache-control"), Some("max-age=60"));
}

#[test]
fn test_date_and_location_headers() {
    let transport = Arc::new(MockTransport::new());
    let when = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
    let origin = Url::parse("http://users.svc/users/1").unwrap();

    entry(&transport)
        .put()
        .with_target("/users/1")
        .with_headers()
        .expires(when)
        .last_modified(when)
        .location(&origin)
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.headers()["expires"], "Sun, 06 Nov 1994 08:49:37 GMT");
    assert_eq!(sent.headers()["last-modified"], "Sun, 06 Nov 1994 08:49:37 GMT");
    assert_eq!(sent.headers()["location"], "http://users.svc/users/1");
}

#[test]
fn test_invalid_header_is_reported_at_execute() {
    let transport = Arc::new(MockTransport::new());

    let err = entry(&transport)
        .get()
        .with_target("/x")
        .with_headers()
        .header("bad header", "v")
        .and_execute_for()
        .execute()
        .unwrap_err();

    assert!(err.is_invalid_request());
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_transport_error_passes_through() {
    let transport = Arc::new(
        MockTransport::new().fail(error::transport("connection refused")),
    );

    let err = entry(&transport)
        .get()
        .with_target("/down")
        .execute()
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_decode_error_keeps_raw_response() {
    let transport = Arc::new(
        MockTransport::new().reply(RawResponse::json(StatusCode::OK, "not json")),
    );

    let response = entry(&transport)
        .get()
        .with_target("/users/1")
        .execute()
        .unwrap();

    let err = response.json::<User>().unwrap_err();
    assert!(err.is_decode());
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().unwrap(), "not json");
}

#[test]
fn test_an_object_reports_decode_errors() {
    let transport = Arc::new(MockTransport::new().reply(RawResponse::json(
        StatusCode::OK,
        r#"{"name":"no id"}"#,
    )));

    let err = entry(&transport)
        .get()
        .with_target("/users/1")
        .an_object::<User>()
        .unwrap_err();

    assert!(err.is_decode());
}

#[test]
fn test_non_success_status_is_not_an_error() {
    let transport = Arc::new(MockTransport::new().reply(RawResponse::new(StatusCode::NOT_FOUND)));

    let response = entry(&transport)
        .delete()
        .with_target("/users/9")
        .a_response_entity()
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.error_for_status().unwrap_err().is_status());
}

#[test]
fn test_post_for_location() {
    let transport = Arc::new(MockTransport::new().reply(
        RawResponse::new(StatusCode::CREATED).with_header(
            HeaderName::from_static("location"),
            HeaderValue::from_static("/users/7"),
        ),
    ));

    let location = entry(&transport)
        .post()
        .with_target("/users")
        .with_body(&NewUser { name: "ada" })
        .for_location()
        .unwrap();

    assert_eq!(location.as_str(), "http://users.svc/users/7");
}

#[test]
fn test_post_for_location_without_header() {
    let transport = Arc::new(MockTransport::new().reply(RawResponse::new(StatusCode::CREATED)));

    let err = entry(&transport)
        .post()
        .with_target("/users")
        .for_location()
        .unwrap_err();

    assert!(err.is_decode());
}

#[test]
fn test_options_allow() {
    let transport = Arc::new(MockTransport::new().reply(
        RawResponse::new(StatusCode::NO_CONTENT).with_header(
            HeaderName::from_static("allow"),
            HeaderValue::from_static("GET, post, GET"),
        ),
    ));

    let allowed = entry(&transport)
        .options()
        .with_target("/users")
        .allow()
        .unwrap();

    assert_eq!(allowed, [Method::GET, Method::POST]);
}

#[test]
fn test_template_variables_and_query() {
    let transport = Arc::new(MockTransport::new());
    let methods = entry(&transport);

    methods
        .get()
        .with_target("/teams/{team}/users/{id}")
        .with_variable("team", "a b")
        .with_variable("id", 7)
        .with_query("expand", "roles")
        .ignoring_response()
        .unwrap();
    assert_eq!(
        transport.last_request().unwrap().url().as_str(),
        "http://users.svc/teams/a%20b/users/7?expand=roles"
    );

    methods
        .get()
        .with_target("/teams/{team}/users/{id}")
        .with_variables(["core", "3"])
        .ignoring_response()
        .unwrap();
    assert_eq!(
        transport.last_request().unwrap().url().as_str(),
        "http://users.svc/teams/core/users/3"
    );

    let err = methods
        .get()
        .with_target("/users/{id}")
        .execute()
        .unwrap_err();
    assert!(err.is_invalid_request());
    assert_eq!(transport.calls(), 2);
}

#[test]
fn test_absolute_target_ignores_base() {
    let transport = Arc::new(MockTransport::new());

    entry(&transport)
        .get()
        .on_url(&Url::parse("https://other.svc/health").unwrap())
        .ignoring_response()
        .unwrap();

    assert_eq!(
        transport.last_request().unwrap().url().as_str(),
        "https://other.svc/health"
    );
}

#[test]
fn test_relative_target_without_base_fails() {
    init_logging();
    let transport = Arc::new(MockTransport::new());
    let methods = HttpMethodBuilder::without_base_url(Arc::clone(&transport));

    let err = methods.get().with_target("/users").execute().unwrap_err();
    assert!(err.is_invalid_request());
    assert_eq!(transport.calls(), 0);

    methods
        .get()
        .with_target("http://users.svc/users")
        .ignoring_response()
        .unwrap();
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let err = HttpMethodBuilder::new("ftp://files.svc", MockTransport::new()).unwrap_err();
    assert!(err.is_builder());

    let err = HttpMethodBuilder::new("not a url", MockTransport::new()).unwrap_err();
    assert!(err.is_builder());
}

#[test]
fn test_defaults_from_config() {
    init_logging();
    let transport = Arc::new(MockTransport::new());
    let config = ClientConfig::new("http://users.svc")
        .default_header("x-team", "core")
        .debug(true);
    let methods = HttpMethodBuilder::from_config(&config, Arc::clone(&transport)).unwrap();

    methods
        .get()
        .with_target("/a")
        .with_headers()
        .header("x-team", "extra")
        .and_execute_for()
        .ignoring_response()
        .unwrap();
    methods.get().with_target("/b").ignoring_response().unwrap();

    let requests = transport.requests();
    let first: Vec<_> = requests[0].headers().get_all("x-team").iter().collect();
    assert_eq!(first, ["core", "extra"]);
    assert_eq!(requests[1].headers()["x-team"], "core");
    assert_eq!(requests[1].headers().len(), 1);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = ClientConfig::new("http://users.svc").default_header("bad header", "v");
    let err = HttpMethodBuilder::from_config(&config, MockTransport::new()).unwrap_err();
    assert!(err.is_builder());
}

#[test]
fn test_form_body_follows_content_type() {
    let transport = Arc::new(MockTransport::new());

    entry(&transport)
        .post()
        .with_target("/login")
        .with_headers()
        .content_type(ContentType::ApplicationFormUrlEncoded)
        .and_execute_for()
        .with_body(&[("user", "ada"), ("pass", "x y")][..])
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.body().unwrap().as_ref(), b"user=ada&pass=x+y");
    assert_eq!(
        sent.headers()["content-type"],
        "application/x-www-form-urlencoded"
    );
}

#[test]
fn test_raw_body_and_auth() {
    let transport = Arc::new(MockTransport::new());

    entry(&transport)
        .put()
        .with_target("/blobs/1")
        .with_raw_body(vec![0_u8, 1, 2])
        .with_headers()
        .basic_auth("ada", Some("secret"))
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.body().unwrap().as_ref(), [0_u8, 1, 2]);
    assert!(sent.headers().get("content-type").is_none());
    assert_eq!(sent.headers()["authorization"], "Basic YWRhOnNlY3JldA==");
}

#[test]
fn test_receive_then_headers() {
    let transport = Arc::new(MockTransport::new());

    entry(&transport)
        .delete()
        .with_target("/users/3")
        .receive()
        .with_headers()
        .bearer_auth("t0k3n")
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.headers()["authorization"], "Bearer t0k3n");
}

#[test]
fn test_result_is_independent_of_later_chains() {
    let transport = Arc::new(
        MockTransport::new()
            .reply(RawResponse::json(StatusCode::OK, r#"{"id":1}"#))
            .reply(RawResponse::json(StatusCode::OK, r#"{"id":2}"#)),
    );
    let methods = entry(&transport);

    let first = methods.get().with_target("/users/1").execute().unwrap();
    let second = methods.get().with_target("/users/2").execute().unwrap();

    assert_eq!(first.json::<User>().unwrap(), User { id: 1 });
    assert_eq!(second.json::<User>().unwrap(), User { id: 2 });
    assert_eq!(first.url().path(), "/users/1");
}

#[test]
fn test_form_content_type_set_after_body() {
    let transport = Arc::new(MockTransport::new());

    entry(&transport)
        .post()
        .with_target("/login")
        .with_body(&[("user", "ada"), ("pass", "x y")][..])
        .with_headers()
        .content_type(ContentType::ApplicationFormUrlEncoded)
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.body().unwrap().as_ref(), b"user=ada&pass=x+y");
    assert_eq!(
        sent.headers()["content-type"],
        "application/x-www-form-urlencoded"
    );
}

#[test]
fn test_out_of_range_expires_is_reported_at_execute() {
    let transport = Arc::new(MockTransport::new());
    let far = SystemTime::UNIX_EPOCH + Duration::from_secs(10_000_000_000_000);

    let err = entry(&transport)
        .get()
        .with_target("/x")
        .with_headers()
        .expires(far)
        .and_execute_for()
        .execute()
        .unwrap_err();

    assert!(err.is_invalid_request());
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_empty_accept_sends_no_accept_header() {
    let transport = Arc::new(MockTransport::new());

    entry(&transport)
        .get()
        .with_target("/x")
        .with_headers()
        .accept(["text/plain"])
        .accept(Vec::<ContentType>::new())
        .and_execute_for()
        .ignoring_response()
        .unwrap();

    assert!(transport.last_request().unwrap().headers().get("accept").is_none());
}

#[test]
fn test_base_url_with_query_is_rejected() {
    let err = HttpMethodBuilder::new("http://users.svc/api?key=1", MockTransport::new())
        .unwrap_err();
    assert!(err.is_builder());

    let config = ClientConfig::new("http://users.svc/api#top");
    let err = HttpMethodBuilder::from_config(&config, MockTransport::new()).unwrap_err();
    assert!(err.is_builder());
}
