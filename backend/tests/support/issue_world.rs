//! Server harness and shared world for the issue tracker behaviour suite.
//!
//! Actix spawns local tasks, so the world owns a current-thread runtime and a
//! `LocalSet`. Dropping the fixture stops the server even when a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::{App, HttpServer, web};
use awc::Client;
use issue_tracker::Trace;
use issue_tracker::domain::{IssueService, TRACE_ID_HEADER};
use issue_tracker::inbound::http::issues;
use issue_tracker::inbound::http::state::HttpState;
use issue_tracker::outbound::persistence::InMemoryIssueRepository;
use mockable::DefaultClock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) struct IssueWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) issue_id: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) last_body: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<IssueWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Request body variants accepted by the issue routes.
pub(crate) enum Payload {
    Empty,
    Json(Value),
    Form(Vec<(&'static str, String)>),
}

pub(crate) struct Captured {
    pub(crate) status: u16,
    pub(crate) trace_id: Option<String>,
    pub(crate) body: Value,
}

fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// Send a request without recording it as the step's response.
pub(crate) fn send(world: &SharedWorld, method: Method, path: &str, payload: Payload) -> Captured {
    with_world_async(world, |base_url| async move {
        let request = Client::default().request(method, format!("{base_url}{path}"));
        let mut response = match payload {
            Payload::Empty => request.send().await.expect("request"),
            Payload::Json(body) => request.send_json(&body).await.expect("json request"),
            Payload::Form(fields) => request.send_form(&fields).await.expect("form request"),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.body().await.expect("body");
        let body: Value = serde_json::from_slice(&body).expect("json body");
        Captured {
            status,
            trace_id,
            body,
        }
    })
}

/// Send a request and keep its response for later assertions.
pub(crate) fn perform(world: &SharedWorld, method: Method, path: &str, payload: Payload) {
    let captured = send(world, method, path, payload);
    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(captured.status);
    ctx.last_trace_id = captured.trace_id;
    ctx.last_body = Some(captured.body);
}

async fn spawn_issue_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .configure(issues::configure)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let service = Arc::new(IssueService::new(
        Arc::new(InMemoryIssueRepository::new()),
        Arc::new(DefaultClock),
    ));
    let http_state = HttpState::new(service.clone(), service);

    let (base_url, server) = local
        .block_on(&runtime, spawn_issue_server(http_state))
        .expect("server should start");

    let world = Rc::new(RefCell::new(IssueWorld {
        runtime,
        local,
        base_url,
        server,
        issue_id: None,
        last_status: None,
        last_trace_id: None,
        last_body: None,
    }));

    WorldFixture { world }
}
