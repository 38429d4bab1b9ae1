//! Opens a port mapping on a gateway, checks it, then removes it.
//!
//! The SSDP answer of the gateway is read from a file (capture it with any
//! M-SEARCH tool, e.g. `ST: urn:schemas-upnp-org:device:InternetGatewayDevice:1`).
//!
//! Usage:
//!   cargo run --example map_port -- <ssdp-response-file> <local-ip> <port> [tcp|udp] [config.yaml]
//!
//! Logs are controlled by `RUST_LOG` (e.g. `RUST_LOG=pmoigd=debug`).

use std::net::IpAddr;
use std::path::Path;

use anyhow::{Context, Result, bail};
use pmoigd::{Gateway, IgdConfig, PortMappingProtocol};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        print_usage();
        return Ok(());
    }

    let ssdp = std::fs::read_to_string(&args[1])
        .with_context(|| format!("Cannot read SSDP response from {}", args[1]))?;
    let local_ip: IpAddr = args[2].parse().context("Invalid local IP")?;
    let port: u16 = args[3].parse().context("Invalid port")?;
    let protocol = match args.get(4) {
        Some(p) => p.parse::<PortMappingProtocol>().map_err(anyhow::Error::msg)?,
        None => PortMappingProtocol::Tcp,
    };
    let config = IgdConfig::load(args.get(5).map(Path::new))?;

    let gateway = Gateway::with_config(local_ip, &ssdp, &config)?;
    println!("Control URL:  {}", gateway.control_url());
    println!("Service type: {}", gateway.service_type());

    match gateway.external_ip()? {
        Some(ip) => println!("External IP:  {}", ip),
        None => println!("External IP:  unknown"),
    }

    gateway.open(protocol, port, "pmoigd map_port example")?;
    if !gateway.is_mapped(protocol, port)? {
        bail!("{} {} not reported as mapped after AddPortMapping", protocol, port);
    }
    println!("Mapped {} {} -> {}:{}", protocol, port, local_ip, port);

    gateway.close(protocol, port)?;
    match gateway.is_mapped(protocol, port) {
        Ok(false) => println!("Mapping removed"),
        Ok(true) => println!("Mapping still present"),
        Err(e) if e.soap_fault().is_some_and(|f| f.is_no_such_entry()) => {
            println!("Mapping removed")
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage: map_port <ssdp-response-file> <local-ip> <port> [tcp|udp] [config.yaml]"
    );
}
