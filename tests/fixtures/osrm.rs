//! OSRM test harness: dataset preparation and container startup.
//!
//! Downloads the Languedoc-Roussillon extract on first use, preprocesses
//! it with the osrm-backend Docker image (MLD pipeline) and starts a
//! reusable `osrm-routed` container. Requires Docker; tests built on this
//! harness are skipped in environments without it by failing fast at
//! container startup.

use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use testcontainers::core::{IntoContainerPort, Mount};
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, ReuseDirective, TestcontainersError};

const REGION: &str = "europe/france/languedoc-roussillon";

fn region_name() -> &'static str {
    REGION.rsplit('/').next().unwrap()
}

/// Downloads and preprocesses the OSM extract, returning the data
/// directory ready to be mounted into `osrm-routed`.
pub fn ensure_dataset() -> Result<PathBuf, String> {
    let root = PathBuf::from(env::var("OSRM_DATA_DIR").unwrap_or_else(|_| "osrm-data".into()));
    let root = if root.is_absolute() {
        root
    } else {
        env::current_dir()
            .map_err(|err| err.to_string())?
            .join(root)
    };
    let data_dir = root.join(region_name());
    fs::create_dir_all(&data_dir).map_err(|err| err.to_string())?;

    let pbf_name = format!("{}-latest.osm.pbf", region_name());
    let pbf_path = data_dir.join(&pbf_name);
    if !pbf_path.exists() {
        let url = format!("https://download.geofabrik.de/{}-latest.osm.pbf", REGION);
        download(&url, &pbf_path)?;
    }

    let osrm_base = data_dir.join(format!("{}-latest.osrm", region_name()));
    if !osrm_base.exists() {
        run_osrm_tool(
            &["osrm-extract", "-p", "/opt/car.lua", &format!("/data/{}", pbf_name)],
            &data_dir,
        )?;
    }

    let partition = osrm_base.with_extension("osrm.partition");
    let cells = osrm_base.with_extension("osrm.cells");
    if !partition.exists() || !cells.exists() {
        let base_name = format!("/data/{}-latest.osrm", region_name());
        run_osrm_tool(&["osrm-partition", &base_name], &data_dir)?;
        run_osrm_tool(&["osrm-customize", &base_name], &data_dir)?;
    }

    Ok(data_dir)
}

/// Starts (or reuses) an `osrm-routed` container over the prepared
/// dataset; returns the container handle and its base URL.
pub fn start_router() -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let data_dir =
        ensure_dataset().map_err(|err| TestcontainersError::other(format!("OSRM prep failed: {err}")))?;

    let image = GenericImage::new("osrm/osrm-backend", "latest")
        .with_exposed_port(5000.tcp())
        .with_mount(Mount::bind_mount(
            data_dir.to_string_lossy().to_string(),
            "/data",
        ))
        .with_cmd(vec![
            "osrm-routed".to_string(),
            "--algorithm".to_string(),
            "mld".to_string(),
            format!("/data/{}-latest.osrm", region_name()),
        ])
        .with_container_name(format!("osrm-{}-mld", region_name()))
        .with_startup_timeout(std::time::Duration::from_secs(60))
        .with_reuse(ReuseDirective::Always);

    let container = image.start()?;
    let port = container.get_host_port_ipv4(5000.tcp())?;
    let base_url = format!("http://127.0.0.1:{port}");

    Ok((container, base_url))
}

fn download(url: &str, dest: &Path) -> Result<(), String> {
    let response = reqwest::blocking::get(url)
        .and_then(|resp| resp.error_for_status())
        .map_err(|err| err.to_string())?;
    let tmp_path = dest.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path).map_err(|err| err.to_string())?);
    let bytes = response.bytes().map_err(|err| err.to_string())?;
    writer.write_all(&bytes).map_err(|err| err.to_string())?;
    writer.flush().map_err(|err| err.to_string())?;
    fs::rename(tmp_path, dest).map_err(|err| err.to_string())?;
    Ok(())
}

fn run_osrm_tool(args: &[&str], data_dir: &Path) -> Result<(), String> {
    let status = Command::new("docker")
        .arg("run")
        .arg("--rm")
        .arg("-t")
        .arg("-v")
        .arg(format!("{}:/data", data_dir.display()))
        .arg("osrm/osrm-backend")
        .args(args)
        .status()
        .map_err(|err| err.to_string())?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("docker exited with status {status}"))
    }
}
