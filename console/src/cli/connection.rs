use anyhow::{Context, Result};
use clap::Args;
use common::config::{resolve_config, ApiConfig, Overrides};
use log::{debug, warn};
use zabbix::ZabbixApi;

/// Zabbix API connection options. Anything left out is read from the config file.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// User for the Zabbix api
    #[clap(short, long)]
    username: Option<String>,

    /// Password for the Zabbix api user
    #[clap(short, long)]
    password: Option<String>,

    /// Zabbix API URL
    #[clap(short, long)]
    api: Option<String>,

    /// Disables certificate validation when using a secure connection
    #[clap(long)]
    no_verify: bool,

    /// Config file location (defaults to $HOME/.zbx.conf)
    #[clap(short, long)]
    config: Option<String>,
}

impl ConnectionArgs {
    /// Resolves the final connection settings from the config file and these flags.
    pub fn resolve(&self) -> Result<ApiConfig> {
        let overrides = Overrides {
            username: self.username.clone(),
            password: self.password.clone(),
            api: self.api.clone(),
            no_verify: self.no_verify,
        };

        let config = resolve_config(self.config.as_deref(), overrides)?;
        debug!("Resolved connection settings: {:?}", config);
        Ok(config)
    }
}

/// Opens an authenticated session with the resolved settings.
pub async fn connect(config: &ApiConfig) -> Result<ZabbixApi> {
    let mut api = ZabbixApi::new(config.api(), config.no_verify())?;
    if config.no_verify() {
        warn!("TLS certificate validation disabled for {}", api.url());
    }

    let url = api.url().to_string();
    api.login(config.username(), config.password())
        .await
        .with_context(|| format!("Login to {} failed", url))?;

    Ok(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mockito::Matcher;
    use serde_json::json;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[clap(flatten)]
        connection: ConnectionArgs,
    }

    fn parse(args: &[&str]) -> ConnectionArgs {
        TestCli::parse_from(std::iter::once("test").chain(args.iter().copied())).connection
    }

    #[test]
    fn test_flags_alone_resolve() {
        let args = parse(&[
            "-u",
            "Admin",
            "-p",
            "zabbix",
            "-a",
            "https://zabbix.example.com/",
            "-c",
            "/nonexistent/zbx.conf",
            "--no-verify",
        ]);

        let config = args.resolve().unwrap();
        assert_eq!(config.username(), "Admin");
        assert_eq!(config.password(), "zabbix");
        assert_eq!(config.api(), "https://zabbix.example.com/");
        assert!(config.no_verify());
    }

    #[test]
    fn test_missing_password_is_reported() {
        let args = parse(&["-u", "Admin", "-c", "/nonexistent/zbx.conf"]);

        let err = args.resolve().unwrap_err();
        assert_eq!(err.to_string(), "API Password not set");
    }

    #[tokio::test]
    async fn test_connect_logs_in() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api_jsonrpc.php")
            .match_body(Matcher::PartialJson(json!({"method": "apiinfo.version"})))
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","result":"6.0.0","id":1}"#)
            .create_async()
            .await;
        let login = server
            .mock("POST", "/api_jsonrpc.php")
            .match_body(Matcher::PartialJson(json!({
                "method": "user.login",
                "params": {"username": "Admin", "password": "zabbix"}
            })))
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","result":"token","id":2}"#)
            .expect(1)
            .create_async()
            .await;

        let url = server.url();
        let args = parse(&["-u", "Admin", "-p", "zabbix", "-a", &url, "-c", "/nonexistent/zbx.conf"]);
        let config = args.resolve().unwrap();

        let api = connect(&config).await.unwrap();
        assert!(api.url().ends_with("/api_jsonrpc.php"));
        login.assert_async().await;
    }

    #[tokio::test]
    async fn test_connect_failure_names_endpoint() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api_jsonrpc.php")
            .with_status(404)
            .create_async()
            .await;

        let url = server.url();
        let args = parse(&["-u", "Admin", "-p", "zabbix", "-a", &url, "-c", "/nonexistent/zbx.conf"]);
        let config = args.resolve().unwrap();

        let err = connect(&config).await.unwrap_err();
        assert!(err.to_string().starts_with("Login to "));
        assert!(err.to_string().contains("api_jsonrpc.php"));
    }
}
