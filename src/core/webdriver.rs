// src/core/webdriver.rs
//! Blocking W3C WebDriver client (JSON over HTTP) plus a local chromedriver
//! process. Only the commands the scraper needs are implemented.
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::consts::{DRIVER_STARTUP_SECS, HTTP_TIMEOUT_SECS, POLL_INTERVAL_MS, USER_AGENT};
use crate::{Error, Result};

/// Key under which W3C drivers return element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    XPath(String),
    Tag(String),
}

impl Locator {
    pub fn strategy(&self) -> &'static str {
        match self {
            Locator::XPath(_) => "xpath",
            Locator::Tag(_) => "tag name",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Locator::XPath(v) | Locator::Tag(v) => v,
        }
    }

    fn to_json(&self) -> Value {
        json!({ "using": self.strategy(), "value": self.value() })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.strategy(), self.value())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementId(String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChromeCapabilities {
    pub headless: bool,
    pub window: (u32, u32),
    pub binary: Option<PathBuf>,
}

impl ChromeCapabilities {
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        if self.headless {
            args.push(s!("--headless=new"));
        }
        args.push(s!("--no-sandbox"));
        args.push(s!("--disable-dev-shm-usage"));
        args.push(format!("--window-size={},{}", self.window.0, self.window.1));
        args
    }

    pub fn to_json(&self) -> Value {
        let mut chrome = json!({ "args": self.args() });
        if let Some(bin) = &self.binary {
            chrome["binary"] = json!(bin.to_string_lossy());
        }
        json!({ "browserName": "chrome", "goog:chromeOptions": chrome })
    }
}

pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?)
}

/// Pull `value` out of a driver response, turning error objects into `Error::WebDriver`.
pub fn unwrap_value(body: Value) -> Result<Value> {
    let value = match body {
        Value::Object(mut map) => map.remove("value").unwrap_or(Value::Null),
        other => return Err(Error::webdriver("invalid response", other.to_string())),
    };
    if let Some(code) = value.get("error").and_then(Value::as_str) {
        let message = value.get("message").and_then(Value::as_str).unwrap_or_default();
        return Err(Error::webdriver(code, message));
    }
    Ok(value)
}

fn element_id(value: &Value) -> Result<ElementId> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(|id| ElementId(s!(id)))
        .ok_or_else(|| Error::webdriver("invalid response", format!("no element reference in {value}")))
}

fn send(req: RequestBuilder) -> Result<Value> {
    let body: Value = req.send()?.json()?;
    unwrap_value(body)
}

/// Poll `probe` until it yields `Some`. Missing and stale elements count as
/// "not yet"; other errors end the wait. A timeout too large to represent as
/// an `Instant` waits without a deadline.
pub fn wait_until<T>(
    timeout: Duration,
    poll: Duration,
    what: &str,
    mut probe: impl FnMut() -> Result<Option<T>>,
) -> Result<T> {
    let deadline = Instant::now().checked_add(timeout);
    loop {
        match probe() {
            Ok(Some(v)) => return Ok(v),
            Ok(None) => {}
            Err(e) if e.is_no_such_element() || e.is_stale_element() => {}
            Err(e) => return Err(e),
        }
        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(Error::Timeout { timeout, what: s!(what) });
                }
                poll.min(deadline - now)
            }
            None => poll,
        };
        thread::sleep(pause);
    }
}

/* ---------------- Session ---------------- */

pub struct Session {
    client: Client,
    base: String,
    id: String,
}

impl Session {
    pub fn new(base_url: &str, caps: &ChromeCapabilities) -> Result<Self> {
        let client = http_client(Duration::from_secs(HTTP_TIMEOUT_SECS))?;
        let base = base_url.trim_end_matches('/').to_string();
        let body = json!({ "capabilities": { "alwaysMatch": caps.to_json() } });

        let value = send(client.post(join!(&base, "/session")).json(&body))?;
        let id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::webdriver("session not created", "response had no sessionId"))?
            .to_string();
        debug!("WebDriver session {id} opened at {base}");
        Ok(Self { client, base, id })
    }

    fn endpoint(&self, path: &str) -> String {
        join!(&self.base, "/session/", &self.id, path)
    }

    fn get(&self, path: &str) -> Result<Value> {
        send(self.client.get(self.endpoint(path)))
    }

    fn post(&self, path: &str, body: Value) -> Result<Value> {
        send(self.client.post(self.endpoint(path)).json(&body))
    }

    pub fn navigate(&self, url: &str) -> Result<()> {
        self.post("/url", json!({ "url": url })).map(drop)
    }

    pub fn find_element(&self, locator: &Locator) -> Result<ElementId> {
        element_id(&self.post("/element", locator.to_json())?)
    }

    pub fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementId>> {
        match self.post("/elements", locator.to_json())? {
            Value::Array(items) => items.iter().map(element_id).collect(),
            other => Err(Error::webdriver("invalid response", format!("expected array, got {other}"))),
        }
    }

    pub fn is_displayed(&self, el: &ElementId) -> Result<bool> {
        self.bool_query(&format!("/element/{}/displayed", el.0))
    }

    pub fn is_enabled(&self, el: &ElementId) -> Result<bool> {
        self.bool_query(&format!("/element/{}/enabled", el.0))
    }

    fn bool_query(&self, path: &str) -> Result<bool> {
        Ok(self.get(path)?.as_bool().unwrap_or(false))
    }

    pub fn click(&self, el: &ElementId) -> Result<()> {
        self.post(&format!("/element/{}/click", el.0), json!({})).map(drop)
    }

    pub fn source(&self) -> Result<String> {
        match self.get("/source")? {
            Value::String(html) => Ok(html),
            other => Err(Error::webdriver("invalid response", format!("page source was {other}"))),
        }
    }

    pub fn delete(self) -> Result<()> {
        send(self.client.delete(self.endpoint(""))).map(drop)
    }
}

/* ---------------- chromedriver process ---------------- */

/// A chromedriver child process, killed on drop.
pub struct ChromeDriverService {
    child: Child,
    url: String,
}

impl ChromeDriverService {
    pub fn start(bin: &Path, port: u16) -> Result<Self> {
        let child = Command::new(bin)
            .arg(format!("--port={port}"))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let svc = Self { child, url: format!("http://127.0.0.1:{port}") };
        svc.wait_ready(Duration::from_secs(DRIVER_STARTUP_SECS))?;
        info!("chromedriver listening on {}", svc.url);
        Ok(svc)
    }

    fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = http_client(Duration::from_secs(2))?;
        let status = join!(&self.url, "/status");
        wait_until(timeout, Duration::from_millis(POLL_INTERVAL_MS), "chromedriver", || {
            let ready = client
                .get(&status)
                .send()
                .and_then(|r| r.json::<Value>())
                .ok()
                .and_then(|body| body.pointer("/value/ready").and_then(Value::as_bool))
                .unwrap_or(false);
            Ok(ready.then_some(()))
        })
        .map_err(|_| Error::DriverStartup(self.url.clone()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for ChromeDriverService {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
