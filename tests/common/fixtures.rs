//! Reusable settings documents.

pub const SETTINGS: &str = "proxy:
  http: http://proxy.corp.com:8080
  https: http://proxy.corp.com:8080
  no_proxy: localhost,127.0.0.1,.corp.com
tools:
  system_ca: false
";

/// Same proxy, with a CA path relative to the test home
pub const SETTINGS_WITH_CA: &str = "proxy:
  http: http://proxy.corp.com:8080
  https: http://proxy.corp.com:8080
  no_proxy: localhost
ca_cert: ~/corp-ca.pem
";

pub const FAKE_PEM: &str = "-----BEGIN CERTIFICATE-----
MIIBfake
-----END CERTIFICATE-----
";

pub const START_MARKER: &str = "# >>> ezproxy >>>";
