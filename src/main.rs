use anyhow::Result;
use clap::Parser;
use console::cli::commands::toggle::Toggle;
use console::cli::connection::{self, ConnectionArgs};
use env_logger::Env;

const CONFIG_HELP: &str = "\
This program can use .ini style configuration files to retrieve the needed API connection information.
To use this type of storage, create a conf file (the default is $HOME/.zbx.conf) that contains at least the [Zabbix API] section and any of the other parameters:

 [Zabbix API]
 username=johndoe
 password=verysecretpassword
 api=https://zabbix.mycompany.com/path/to/zabbix/frontend/
 no_verify=true
";

// The about text still describes the inventory mode switcher this tool grew
// out of; only the single trigger toggle is implemented.
#[derive(Parser, Debug)]
#[clap(
    name = "ztrigswitcher",
    about = "Switches the host inventory mode for the specified host(s) or hostgroup(s). The default setting is to switch to \"automatic\" mode.",
    after_help = CONFIG_HELP,
    version
)]
struct Cli {
    #[clap(flatten)]
    toggle: Toggle,

    #[clap(flatten)]
    connection: ConnectionArgs,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_level(true)
        .format_module_path(false)
        .format_indent(Some(4))
        .try_init()?;

    let cli = Cli::parse();

    let config = cli.connection.resolve()?;
    let mut api = connection::connect(&config).await?;
    log::debug!("Session open at {}", api.url());

    cli.toggle.run(&mut api).await
}
