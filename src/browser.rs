// src/browser.rs
//! What the scraper needs from a browser. `WebDriverBrowser` drives Chrome;
//! tests supply their own implementation.
use std::time::Duration;

use tracing::info;

use crate::Result;
use crate::config::DriverOptions;
use crate::core::webdriver::{ChromeCapabilities, ChromeDriverService, Session, wait_until};

pub use crate::core::webdriver::Locator;

pub trait Browser {
    fn goto(&mut self, url: &str) -> Result<()>;

    /// Wait until an element matching `locator` is displayed and enabled, then
    /// click it. `Error::Timeout` when that does not happen within `timeout`.
    fn click_when_clickable(&mut self, locator: &Locator, timeout: Duration) -> Result<()>;

    /// `Error::Timeout` when no element matches within `timeout`.
    fn wait_for_presence(&mut self, locator: &Locator, timeout: Duration) -> Result<()>;

    fn page_source(&mut self) -> Result<String>;

    /// End the session. Calling it again is a no-op.
    fn quit(&mut self) -> Result<()>;
}

pub struct WebDriverBrowser {
    session: Option<Session>,
    poll: Duration,
    // Dropped after the session is closed.
    _service: Option<ChromeDriverService>,
}

impl WebDriverBrowser {
    /// Attach to `webdriver_url` when configured, else spawn chromedriver.
    pub fn launch(opts: &DriverOptions) -> Result<Self> {
        let (base, service) = match &opts.webdriver_url {
            Some(url) => (url.clone(), None),
            None => {
                let svc = ChromeDriverService::start(&opts.chromedriver, opts.port)?;
                (s!(svc.url()), Some(svc))
            }
        };

        let caps = ChromeCapabilities {
            headless: opts.headless,
            window: (opts.window_width, opts.window_height),
            binary: opts.chrome_binary.clone(),
        };
        let session = Session::new(&base, &caps)?;
        info!("WebDriver initialized.");

        Ok(Self { session: Some(session), poll: opts.poll_interval(), _service: service })
    }

    fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| crate::Error::webdriver("invalid session id", "session already closed"))
    }
}

impl Browser for WebDriverBrowser {
    fn goto(&mut self, url: &str) -> Result<()> {
        self.session()?.navigate(url)
    }

    fn click_when_clickable(&mut self, locator: &Locator, timeout: Duration) -> Result<()> {
        let session = self.session()?;
        let el = wait_until(timeout, self.poll, &locator.to_string(), || {
            let el = session.find_element(locator)?;
            let clickable = session.is_displayed(&el)? && session.is_enabled(&el)?;
            Ok(clickable.then_some(el))
        })?;
        session.click(&el)
    }

    fn wait_for_presence(&mut self, locator: &Locator, timeout: Duration) -> Result<()> {
        let session = self.session()?;
        wait_until(timeout, self.poll, &locator.to_string(), || {
            Ok(session.find_elements(locator)?.first().map(|_| ()))
        })
    }

    fn page_source(&mut self) -> Result<String> {
        self.session()?.source()
    }

    fn quit(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => session.delete(),
            None => Ok(()),
        }
    }
}

impl Drop for WebDriverBrowser {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}
