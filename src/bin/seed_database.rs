//! Maintenance database seeder
//!
//! Fills a running API instance with department rows and quality-control
//! entries linked to them through frontend codes (`PRD-1`, `OVH-2`, ...).
//!
//! Usage:
//!   `cargo run --bin seed_database -- --url http://localhost:8080 --token YOUR_JWT_TOKEN`

use anyhow::{Context, Result, anyhow, bail};
use clap::{Arg, ArgAction, Command};
use console::style;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rand::seq::IndexedRandom;
use reqwest::Client;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::Duration;

const STEPS: usize = 6;

#[derive(Debug, Clone)]
pub struct SeedingConfig {
    pub base_url: String,
    pub jwt_token: Option<String>,
    pub client: Client,
}

/// Primary keys of the rows created so far, per department
#[derive(Debug, Default)]
pub struct CreatedRows {
    pub production: Vec<i64>,
    pub overhaul: Vec<i64>,
    pub engineering: Vec<i64>,
    pub inventory: Vec<i64>,
    pub calibration: Vec<i64>,
    pub quality_control: Vec<Value>,
}

pub struct DatabaseSeeder {
    config: SeedingConfig,
    created: CreatedRows,
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} {msg}")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

fn step(number: usize, message: &str) {
    println!(
        "{} {message}",
        style(format!("[{number}/{STEPS}]")).bold().dim()
    );
}

fn date_in_2025(rng: &mut impl Rng) -> String {
    format!(
        "2025-{:02}-{:02}",
        rng.random_range(1..=12),
        rng.random_range(1..=28)
    )
}

async fn post(config: &SeedingConfig, endpoint: &str, body: &Value) -> Result<Value> {
    let url = format!("{}{endpoint}", config.base_url);
    let mut request = config.client.post(&url).json(body);
    if let Some(token) = &config.jwt_token {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("Request to {endpoint} failed"))?;
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        bail!("HTTP {status} {endpoint}: {error_text}");
    }
    Ok(response.json::<Value>().await?)
}

fn primary_key(row: &Value, column: &str) -> Result<i64> {
    row[column]
        .as_i64()
        .ok_or_else(|| anyhow!("Response has no '{column}': {row}"))
}

impl DatabaseSeeder {
    pub fn new(base_url: &str, jwt_token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            config: SeedingConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                jwt_token,
                client,
            },
            created: CreatedRows::default(),
        })
    }

    /// Posts rows one by one, returning the primary key of each.
    async fn create_rows(
        &self,
        endpoint: &str,
        primary_key_column: &str,
        rows: Vec<Value>,
        label: &str,
    ) -> Result<Vec<i64>> {
        let pb = progress_bar(rows.len())?;
        let mut ids = Vec::with_capacity(rows.len());

        for row in rows {
            pb.set_message(format!("Creating {label}"));
            let created = post(&self.config, endpoint, &row).await?;
            ids.push(primary_key(&created, primary_key_column)?);
            pb.inc(1);
        }

        pb.finish_with_message(format!("{} {label} created", ids.len()));
        Ok(ids)
    }

    pub async fn create_production_runs(&mut self) -> Result<()> {
        step(1, "Creating production runs...");
        let mut rng = rand::rng();

        let products = [
            "Radio Lokomotif",
            "Wiper Motor KRL",
            "Panel Kontrol AC",
            "Lampu Sorot LED",
            "Speedometer Digital",
        ];
        let rows = products
            .iter()
            .map(|name| {
                let target = rng.random_range(10..=60);
                let status = ["Perencanaan", "Berjalan", "Selesai"]
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("Berjalan");
                json!({
                    "name": name,
                    "target": target,
                    "completed": rng.random_range(0..=target),
                    "status": status,
                    "start_date": "2025-01-06",
                    "personnel": ["198601012010011001", "199002152015031002"],
                    "materials": [{"item": "Kabel NYAF 1.5mm", "qty": rng.random_range(5..=50)}]
                })
            })
            .collect();

        self.created.production = self
            .create_rows("/api/production", "produksi_id", rows, "production runs")
            .await?;
        Ok(())
    }

    pub async fn create_overhaul_jobs(&mut self) -> Result<()> {
        step(2, "Creating overhaul jobs...");
        let mut rng = rand::rng();

        let jobs = [
            ("Overhaul Bogie CC206", "Balai Yasa Yogyakarta"),
            ("Overhaul Traksi Motor", "Balai Yasa Manggarai"),
            ("Overhaul Kompresor Udara", "Depo Lokomotif Semarang"),
            ("Overhaul Sistem Rem", "Balai Yasa Tegal"),
        ];
        let rows = jobs
            .iter()
            .map(|(name, location)| {
                json!({
                    "name": name,
                    "location": location,
                    "status": "Dalam Proses",
                    "estimate": date_in_2025(&mut rng),
                    "progress": rng.random_range(0..=100)
                })
            })
            .collect();

        self.created.overhaul = self
            .create_rows("/api/overhaul", "overhaul_id", rows, "overhaul jobs")
            .await?;
        Ok(())
    }

    pub async fn create_engineering_projects(&mut self) -> Result<()> {
        step(3, "Creating engineering projects...");
        let mut rng = rand::rng();

        let projects = [
            "Retrofit Sistem Pengereman",
            "Desain Ulang Kabin Masinis",
            "Integrasi Sensor Suhu Gandar",
        ];
        let rows = projects
            .iter()
            .map(|name| {
                json!({
                    "name": name,
                    "status": "Perencanaan",
                    "team": ["Andi", "Sari", "Budi"],
                    "deadline": date_in_2025(&mut rng),
                    "progress": rng.random_range(0..=100)
                })
            })
            .collect();

        self.created.engineering = self
            .create_rows("/api/engineering", "rekayasa_id", rows, "engineering projects")
            .await?;
        Ok(())
    }

    pub async fn create_inventory_items(&mut self) -> Result<()> {
        step(4, "Creating inventory items...");
        let mut rng = rand::rng();

        let items = [
            ("Multimeter Fluke 87V", "MM-087"),
            ("Torque Wrench 200Nm", "TW-200"),
            ("Tang Ampere Kyoritsu", "TA-2046"),
            ("Insulation Tester", "IT-5000"),
        ];
        // Suffix keeps item codes unique across repeated seeding runs
        let run_tag: u16 = rng.random();
        let rows = items
            .iter()
            .map(|(name, code)| {
                json!({
                    "name": name,
                    "quantity": rng.random_range(1..=20),
                    "location": "Gudang Peralatan",
                    "status": "Tersedia",
                    "item_code": format!("INV-{code}-{run_tag:04x}")
                })
            })
            .collect();

        self.created.inventory = self
            .create_rows("/api/inventory", "inventory_id", rows, "inventory items")
            .await?;
        Ok(())
    }

    pub async fn create_calibration_records(&mut self) -> Result<()> {
        step(5, "Creating calibration schedule...");
        let mut rng = rand::rng();

        let tools = ["Torque Wrench 200Nm", "Multimeter Fluke 87V", "Manometer Rem"];
        let rows = tools
            .iter()
            .map(|tool| {
                json!({
                    "tool_name": tool,
                    "status": "Terjadwal",
                    "progress_step": rng.random_range(0..=5),
                    "due_date": date_in_2025(&mut rng)
                })
            })
            .collect();

        self.created.calibration = self
            .create_rows("/api/calibration", "calibration_id", rows, "calibration records")
            .await?;
        Ok(())
    }

    /// One entry per department row, plus two whose codes cannot resolve.
    fn quality_control_payloads(&self) -> Vec<Value> {
        let mut rng = rand::rng();
        let targets = [
            ("Production", "PRD", &self.created.production),
            ("Overhaul", "OVH", &self.created.overhaul),
            ("Rekayasa", "RKY", &self.created.engineering),
            ("Kalibrasi", "KAL", &self.created.inventory),
        ];

        let mut codes: Vec<(&str, String)> = targets
            .iter()
            .flat_map(|(department, prefix, ids)| {
                ids.iter().map(move |id| (*department, format!("{prefix}-{id}")))
            })
            .collect();
        codes.push(("Production", "PRD-999999".to_string()));
        codes.push(("Overhaul", "XYZ-3".to_string()));

        codes
            .into_iter()
            .enumerate()
            .map(|(index, (department, code))| {
                let tested = rng.random_range(10..=40);
                let passed = rng.random_range(tested * 3 / 4..=tested);
                let status = if passed == tested { "Lulus" } else { "Perlu Tinjauan" };
                json!({
                    "id": code,
                    "product": format!("Produk Uji {}", index + 1),
                    "batch": format!("B-2025-{:03}", index + 1),
                    "status": status,
                    "tested": tested,
                    "passed": passed,
                    "date": date_in_2025(&mut rng),
                    "department": department
                })
            })
            .collect()
    }

    pub async fn create_quality_control_entries(&mut self, max_concurrent: usize) -> Result<()> {
        step(6, "Creating quality-control entries...");

        let payloads = self.quality_control_payloads();
        let pb = progress_bar(payloads.len())?;
        pb.set_message("Linking entries");
        let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));

        let tasks = payloads.into_iter().map(|payload| {
            let semaphore = Arc::clone(&semaphore);
            let config = self.config.clone();
            let pb = pb.clone();
            async move {
                let _permit = semaphore.acquire().await?;
                let created = post(&config, "/api/quality_control", &payload).await;
                pb.inc(1);
                created
            }
        });

        for result in join_all(tasks).await {
            self.created.quality_control.push(result?);
        }

        pb.finish_with_message("Quality-control entries created");
        Ok(())
    }

    pub async fn seed_database(&mut self, max_concurrent: usize) -> Result<()> {
        self.create_production_runs().await?;
        self.create_overhaul_jobs().await?;
        self.create_engineering_projects().await?;
        self.create_inventory_items().await?;
        self.create_calibration_records().await?;
        self.create_quality_control_entries(max_concurrent).await?;

        self.display_summary();
        Ok(())
    }

    fn display_summary(&self) {
        println!();
        println!("{}", style("Database seeding complete").bold().green());
        println!("{}", style("=".repeat(50)).dim());

        let summary = [
            ("Production runs", self.created.production.len()),
            ("Overhaul jobs", self.created.overhaul.len()),
            ("Engineering projects", self.created.engineering.len()),
            ("Inventory items", self.created.inventory.len()),
            ("Calibration records", self.created.calibration.len()),
            ("QC entries", self.created.quality_control.len()),
        ];
        for (name, count) in summary {
            println!("{:.<24} {}", style(name).cyan(), style(count).bold().green());
        }

        let mut link_statuses: BTreeMap<String, usize> = BTreeMap::new();
        for entry in &self.created.quality_control {
            let status = entry["link"]["status"].as_str().unwrap_or("unknown");
            *link_statuses.entry(status.to_string()).or_default() += 1;
        }
        println!();
        println!("{}", style("QC link outcomes").bold());
        for (status, count) in link_statuses {
            println!("{:.<24} {}", style(status).cyan(), style(count).bold());
        }
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("Maintenance Database Seeder")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Seeds the maintenance API with department rows and linked quality-control entries")
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("API base URL")
                .default_value("http://localhost:8080"),
        )
        .arg(
            Arg::new("token")
                .short('t')
                .long("token")
                .value_name("JWT_TOKEN")
                .help("JWT authentication token, when the API runs with Keycloak"),
        )
        .arg(
            Arg::new("concurrency")
                .short('c')
                .long("concurrency")
                .value_name("N")
                .help("Parallel requests when creating QC entries")
                .value_parser(clap::value_parser!(usize))
                .default_value("4")
                .action(ArgAction::Set),
        )
        .get_matches();

    let base_url = matches
        .get_one::<String>("url")
        .context("--url has a default")?;
    let jwt_token = matches.get_one::<String>("token").cloned();
    let concurrency = *matches
        .get_one::<usize>("concurrency")
        .context("--concurrency has a default")?;

    println!("{}", style("Maintenance Database Seeder").bold());
    println!("{}", style("-".repeat(40)).dim());
    println!("API URL: {}", style(base_url).cyan());
    if jwt_token.is_none() {
        println!("{}", style("No token given, assuming auth is disabled").yellow());
    }

    let mut seeder = DatabaseSeeder::new(base_url, jwt_token)?;
    seeder.seed_database(concurrency).await?;

    Ok(())
}
