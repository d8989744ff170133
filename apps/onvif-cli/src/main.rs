//! ONVIF CLI - discovery and device queries from the command line.
//!
//! Thin front-end over `onvif-core`: every subcommand maps to one library
//! call, and Ctrl+C cancels whatever is in flight.

mod config;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use onvif_core::{
    CancellationToken, Device, DiscoverOptions, Discoverer, ErrorCode, NetworkInterface,
    OnvifClient, OnvifError,
};
use serde::Serialize;
use tokio::signal;

use crate::config::CliConfig;

/// ONVIF CLI - find and query ONVIF cameras.
#[derive(Parser, Debug)]
#[command(name = "onvif-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (YAML).
    #[arg(short, long, value_name = "FILE", env = "ONVIF_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, default_value = "warn", env = "ONVIF_LOG_LEVEL", global = true)]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    command: Command,
}

/// Connection flags shared by the device subcommands.
#[derive(ClapArgs, Debug)]
struct DeviceArgs {
    /// Device address: host, host:port or a full service URL.
    #[arg(short, long)]
    endpoint: Option<String>,

    #[arg(short, long)]
    username: Option<String>,

    #[arg(short, long)]
    password: Option<String>,

    /// Per-call timeout in seconds.
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List host network interfaces.
    Interfaces {
        #[arg(long)]
        json: bool,
    },
    /// Probe for devices with WS-Discovery.
    Discover {
        /// Interface name or an address bound to it.
        #[arg(short, long)]
        interface: Option<String>,

        /// Collection window in seconds.
        #[arg(short, long)]
        timeout: Option<u64>,

        #[arg(long)]
        json: bool,
    },
    /// GetDeviceInformation.
    Info(DeviceArgs),
    /// GetSystemDateAndTime.
    Time(DeviceArgs),
    /// List media profiles.
    Profiles(DeviceArgs),
    /// RTSP URI for a profile (first profile if none given).
    StreamUri {
        #[command(flatten)]
        device: DeviceArgs,

        /// Profile token.
        #[arg(long)]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    let config = CliConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                log::info!("Interrupted, cancelling...");
                cancel.cancel();
            }
        });
    }

    run(args.command, config, &cancel).await
}

async fn run(command: Command, mut config: CliConfig, cancel: &CancellationToken) -> Result<()> {
    match command {
        Command::Interfaces { json } => {
            let interfaces = Discoverer::default().list_interfaces();
            if json {
                print_json(&interfaces)
            } else {
                print_interfaces(&interfaces);
                Ok(())
            }
        }
        Command::Discover {
            interface,
            timeout,
            json,
        } => {
            if interface.is_some() {
                config.interface = interface;
            }
            if let Some(secs) = timeout {
                config.discovery_timeout_secs = secs;
            }
            discover(&config, cancel, json).await
        }
        Command::Info(device) => {
            let json = device.json;
            let client = connect(&mut config, device)?;
            let info = client
                .get_device_information(cancel)
                .await
                .map_err(|e| explain(e, "GetDeviceInformation"))?;
            if json {
                return print_json(&info);
            }
            println!("Manufacturer:  {}", info.manufacturer);
            println!("Model:         {}", info.model);
            println!("Firmware:      {}", info.firmware_version);
            println!("Serial number: {}", info.serial_number);
            println!("Hardware ID:   {}", info.hardware_id);
            Ok(())
        }
        Command::Time(device) => {
            let json = device.json;
            let client = connect(&mut config, device)?;
            let time = client
                .get_system_date_and_time(cancel)
                .await
                .map_err(|e| explain(e, "GetSystemDateAndTime"))?;
            if json {
                return print_json(&time);
            }
            println!("Type:      {}", time.date_time_type);
            println!("DST:       {}", time.daylight_savings);
            println!("Time zone: {}", time.time_zone.as_deref().unwrap_or("-"));
            match time.utc {
                Some(utc) => println!("UTC:       {}", utc.to_rfc3339()),
                None => println!("UTC:       -"),
            }
            Ok(())
        }
        Command::Profiles(device) => {
            let json = device.json;
            let client = connect(&mut config, device)?;
            initialize(&client, cancel).await;
            let profiles = client
                .get_profiles(cancel)
                .await
                .map_err(|e| explain(e, "GetProfiles"))?;
            if json {
                return print_json(&profiles);
            }
            for profile in &profiles {
                let video = profile
                    .video_encoder
                    .as_ref()
                    .map(|enc| match (enc.width, enc.height) {
                        (Some(w), Some(h)) => format!("{} {}x{}", enc.encoding, w, h),
                        _ => enc.encoding.clone(),
                    })
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<20} {:<24} {}", profile.token, profile.name, video);
            }
            Ok(())
        }
        Command::StreamUri { device, profile } => {
            let json = device.json;
            let client = connect(&mut config, device)?;
            initialize(&client, cancel).await;
            let token = match profile {
                Some(token) => token,
                None => client
                    .get_profiles(cancel)
                    .await
                    .map_err(|e| explain(e, "GetProfiles"))?
                    .into_iter()
                    .next()
                    .map(|p| p.token)
                    .ok_or_else(|| anyhow!("device reports no media profiles"))?,
            };
            let uri = client
                .get_stream_uri(cancel, &token)
                .await
                .map_err(|e| explain(e, "GetStreamUri"))?;
            if json {
                return print_json(&uri);
            }
            println!("{}", uri.uri);
            Ok(())
        }
    }
}

/// Builds a client from config with command-line flags applied on top.
fn connect(config: &mut CliConfig, device: DeviceArgs) -> Result<OnvifClient> {
    if device.endpoint.is_some() {
        config.endpoint = device.endpoint;
    }
    if device.username.is_some() {
        config.username = device.username;
    }
    if device.password.is_some() {
        config.password = device.password;
    }
    if let Some(secs) = device.timeout {
        config.timeout_secs = secs;
    }

    let endpoint = config
        .endpoint
        .as_deref()
        .ok_or_else(|| anyhow!("no endpoint given (use --endpoint or ONVIF_ENDPOINT)"))?;
    let client = OnvifClient::with_config(endpoint, config.client_config())?;
    log::debug!("Using endpoint {}", client.endpoint());
    Ok(client)
}

/// Learns service addresses; devices that refuse `GetCapabilities` still
/// work through the device endpoint.
async fn initialize(client: &OnvifClient, cancel: &CancellationToken) {
    if let Err(e) = client.initialize(cancel).await {
        log::warn!("GetCapabilities failed, using device endpoint for all services: {}", e);
    }
}

async fn discover(config: &CliConfig, cancel: &CancellationToken, json: bool) -> Result<()> {
    let discovery = config.discovery_config();
    let options = DiscoverOptions {
        interface: discovery.interface.clone(),
    };
    let report = Discoverer::default()
        .discover_with_report(cancel, discovery.timeout, &options)
        .await
        .map_err(|e| {
            let code = e.code();
            anyhow::Error::new(e).context(format!("Discovery failed ({})", code))
        })?;

    for failure in &report.failures {
        eprintln!("warning: {}", failure);
    }

    if json {
        return print_json(&report.devices);
    }
    print_devices(&report.devices);
    Ok(())
}

/// Adds the operation name and error code to a library error.
fn explain(err: onvif_core::SoapError, operation: &str) -> anyhow::Error {
    let err = OnvifError::from(err);
    let code = err.code();
    anyhow::Error::new(err).context(format!("{} failed ({})", operation, code))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_interfaces(interfaces: &[NetworkInterface]) {
    for iface in interfaces {
        let addrs: Vec<String> = iface.addresses.iter().map(ToString::to_string).collect();
        println!(
            "{:<16} {:<5} {:<10} {}",
            iface.name,
            if iface.up { "up" } else { "down" },
            if iface.multicast { "multicast" } else { "-" },
            addrs.join(", ")
        );
    }
}

fn print_devices(devices: &[Device]) {
    if devices.is_empty() {
        println!("No devices found");
        return;
    }
    for device in devices {
        println!("{}", device.endpoint_reference);
        println!("  Name:     {}", device.name.as_deref().unwrap_or("-"));
        println!("  Hardware: {}", device.hardware.as_deref().unwrap_or("-"));
        for xaddr in &device.xaddrs {
            println!("  XAddr:    {}", xaddr);
        }
    }
}
