// export.rs
// JSON snapshot, CSV table and Markdown report of the current session

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::CavityError;
use crate::session::SessionStats;
use crate::state::SimulationState;

pub const EXPORT_VERSION: &str = "1.0.0";
pub const EXPORT_TYPE: &str = "quantum-vacuum-simulation";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    fn file_prefix(&self) -> &'static str {
        match self {
            ExportFormat::Json => "quantum-simulation",
            ExportFormat::Csv => "quantum-data",
            ExportFormat::Markdown => "quantum-report",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }

    /// `<prefix>-<unix millis>.<ext>`
    pub fn file_name(&self, at: DateTime<Utc>) -> String {
        format!("{}-{}.{}", self.file_prefix(), at.timestamp_millis(), self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "md" | "markdown" | "report" => Ok(ExportFormat::Markdown),
            other => Err(format!("Unknown export format '{}'", other)),
        }
    }
}

/// Everything an export reads. Borrowed from the session at export time.
#[derive(Clone, Copy, Debug)]
pub struct ExportContext<'a> {
    pub state: &'a SimulationState,
    pub score: u64,
    pub session: &'a SessionStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportMetadata {
    version: &'static str,
    export_type: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    timestamp: DateTime<Utc>,
    simulation_state: &'a SimulationState,
    score: u64,
    session_data: &'a SessionStats,
    metadata: ExportMetadata,
}

pub fn to_json(ctx: &ExportContext, at: DateTime<Utc>) -> Result<String, CavityError> {
    let export = JsonExport {
        timestamp: at,
        simulation_state: ctx.state,
        score: ctx.score,
        session_data: ctx.session,
        metadata: ExportMetadata {
            version: EXPORT_VERSION,
            export_type: EXPORT_TYPE,
        },
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn to_csv(state: &SimulationState, score: u64) -> String {
    let rows: [(&str, String); 10] = [
        ("Mirror Angle", state.mirror_angle.to_string()),
        ("Mirror Spacing", state.mirror_spacing.to_string()),
        ("Magnetic Field", state.magnetic_field.to_string()),
        ("Field Direction", state.field_direction.to_string()),
        ("Chirality", state.chirality.to_string()),
        ("Inserted Material", state.inserted_material.key().to_string()),
        ("Energy", state.energy.to_string()),
        ("Coherence", state.coherence.to_string()),
        ("Topological Phase", state.topological_phase.to_string()),
        ("Score", score.to_string()),
    ];
    let mut out = String::from("Parameter,Value");
    for (name, value) in rows {
        out.push('\n');
        out.push_str(name);
        out.push(',');
        out.push_str(&value);
    }
    out
}

pub fn to_markdown(state: &SimulationState, score: u64, generated: DateTime<Local>) -> String {
    let verdicts = [
        if state.topological_phase {
            "✅ **Topological Phase Achieved** - The system has successfully entered a topological quantum state, indicating strong material-field coupling."
        } else {
            "❌ **No Topological Phase** - Consider adjusting magnetic field strength or material selection to achieve phase transition."
        },
        if state.coherence > 80.0 {
            "✅ **High Coherence** - Excellent quantum coherence maintained."
        } else {
            "⚠️ **Low Coherence** - System coherence could be improved through better cavity optimization."
        },
        if state.chirality.abs() > 0.5 {
            "✅ **Strong Chiral Effects** - Significant chirality observed, indicating successful manipulation of quantum vacuum properties."
        } else {
            "⚠️ **Weak Chiral Effects** - Consider adjusting field direction and mirror configuration for stronger chiral coupling."
        },
    ];

    format!(
        "# Quantum Vacuum Simulation Report\n\n\
         **Generated:** {generated}\n\
         **Total Score:** {score} points\n\n\
         ## Current Configuration\n\
         - **Mirror Angle:** {angle}°\n\
         - **Mirror Spacing:** {spacing} nm\n\
         - **Magnetic Field:** {field} T\n\
         - **Field Direction:** {direction}°\n\
         - **Inserted Material:** {material}\n\n\
         ## Results\n\
         - **Energy Level:** {energy} μeV\n\
         - **Coherence:** {coherence}%\n\
         - **Chirality:** {chirality}\n\
         - **Topological Phase:** {phase}\n\n\
         ## Analysis\n\
         {analysis}\n",
        generated = generated.format("%Y-%m-%d %H:%M:%S"),
        angle = state.mirror_angle,
        spacing = state.mirror_spacing,
        field = state.magnetic_field,
        direction = state.field_direction,
        material = state.inserted_material.key(),
        energy = state.energy,
        coherence = state.coherence,
        chirality = state.chirality,
        phase = if state.topological_phase { "Active" } else { "Inactive" },
        analysis = verdicts.join("\n\n"),
    )
}

/// Render `format` and write it under `dir`, creating the directory if needed.
pub fn write_export<P: AsRef<Path>>(
    dir: P,
    format: ExportFormat,
    ctx: &ExportContext,
) -> Result<PathBuf, CavityError> {
    let now = Utc::now();
    let body = match format {
        ExportFormat::Json => to_json(ctx, now)?,
        ExportFormat::Csv => to_csv(ctx.state, ctx.score),
        ExportFormat::Markdown => to_markdown(ctx.state, ctx.score, now.with_timezone(&Local)),
    };

    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format.file_name(now));
    std::fs::write(&path, body)?;
    log::info!("Exported {:?} to {}", format, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use chrono::TimeZone;

    fn topological_state() -> SimulationState {
        SimulationState {
            mirror_angle: 45.0,
            mirror_spacing: 100.0,
            magnetic_field: 0.8,
            field_direction: 0.0,
            chirality: 0.57,
            inserted_material: Material::Graphene,
            energy: 156.0,
            coherence: 100.0,
            topological_phase: true,
        }
    }

    #[test]
    fn csv_rows_match_display_values() {
        let csv = to_csv(&topological_state(), 100);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Parameter,Value");
        assert_eq!(lines[1], "Mirror Angle,45");
        assert_eq!(lines[3], "Magnetic Field,0.8");
        assert_eq!(lines[5], "Chirality,0.57");
        assert_eq!(lines[6], "Inserted Material,graphene");
        assert_eq!(lines[9], "Topological Phase,true");
        assert_eq!(lines[10], "Score,100");
    }

    #[test]
    fn json_has_metadata_and_session() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let stats = SessionStats::starting_at(at);
        let state = topological_state();
        let ctx = ExportContext { state: &state, score: 250, session: &stats };
        let value: serde_json::Value = serde_json::from_str(&to_json(&ctx, at).unwrap()).unwrap();

        assert_eq!(value["score"], 250);
        assert_eq!(value["metadata"]["version"], "1.0.0");
        assert_eq!(value["metadata"]["exportType"], "quantum-vacuum-simulation");
        assert_eq!(value["simulationState"]["insertedMaterial"], "graphene");
        assert_eq!(value["sessionData"]["experimentsRun"], 0);
        assert!(value["timestamp"].as_str().unwrap().starts_with("2024-05-01T12:00:00"));
    }

    #[test]
    fn report_verdicts_follow_state() {
        let generated = Local::now();
        let good = to_markdown(&topological_state(), 100, generated);
        assert!(good.contains("✅ **Topological Phase Achieved**"));
        assert!(good.contains("✅ **High Coherence**"));
        assert!(good.contains("✅ **Strong Chiral Effects**"));

        let plain = to_markdown(&SimulationState::default(), 0, generated);
        assert!(plain.contains("❌ **No Topological Phase**"));
        assert!(plain.contains("⚠️ **Low Coherence**"));
        assert!(plain.contains("⚠️ **Weak Chiral Effects**"));
        assert!(plain.contains("- **Inserted Material:** none"));
    }

    #[test]
    fn report_sections_in_order() {
        let generated = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap();
        let md = to_markdown(&topological_state(), 100, generated);
        assert!(md.starts_with(
            "# Quantum Vacuum Simulation Report\n\n**Generated:** 2024-05-01 09:30:05\n**Total Score:** 100 points\n\n"
        ));
        assert!(md.contains(
            "## Current Configuration\n- **Mirror Angle:** 45°\n- **Mirror Spacing:** 100 nm\n\
             - **Magnetic Field:** 0.8 T\n- **Field Direction:** 0°\n- **Inserted Material:** graphene\n\n## Results\n"
        ));
        assert!(md.contains("- **Energy Level:** 156 μeV\n- **Coherence:** 100%\n- **Chirality:** 0.57\n"));
        assert!(md.contains("- **Topological Phase:** Active\n\n## Analysis\n✅"));
        assert!(md.ends_with("chiral coupling.\n") || md.ends_with("quantum vacuum properties.\n"));
    }

    #[test]
    fn file_names_carry_prefix_and_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(ExportFormat::Json.file_name(at), "quantum-simulation-1700000000123.json");
        assert_eq!(ExportFormat::Csv.file_name(at), "quantum-data-1700000000123.csv");
        assert_eq!("md".parse::<ExportFormat>().unwrap().file_name(at), "quantum-report-1700000000123.md");
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
