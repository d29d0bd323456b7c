use crate::infra::{seeded_readers, DEMO_STUDENT};
use admission_fit::admissions::{
    build_plan, compare_scenarios, simulate, ActivityEntry, AdmissionFitService, AttendanceEntry,
    FitEngine, FitTier, GradeCsvImporter, GradeEntry, ImprovementPlan, ScenarioComparison,
    ScoreView, SimulationInput, SimulationResult, StudentId, StudentRecords, VolunteerEntry,
};
use admission_fit::config::AppConfig;
use admission_fit::error::AppError;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Tier the improvement plan aims for (fit, challenge, unlikely)
    #[arg(long, default_value_t = FitTier::Fit)]
    pub(crate) target_tier: FitTier,
    /// Hypothetical activity count applied to every target school
    #[arg(long)]
    pub(crate) simulate_activities: Option<i64>,
    /// Plan start date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Grade export with subject,rank,year,term columns
    #[arg(long)]
    pub(crate) grades_csv: PathBuf,
    /// Current extracurricular activity count
    #[arg(long, default_value_t = 0)]
    pub(crate) activities: u32,
    /// Volunteer hours logged so far
    #[arg(long, default_value_t = 0.0)]
    pub(crate) volunteer_hours: f64,
    /// Unexcused absences plus lateness incidents
    #[arg(long, default_value_t = 0)]
    pub(crate) absences: u32,
    /// Target school's published cutoff grade (1 best, 9 worst)
    #[arg(long)]
    pub(crate) cutoff: Option<f64>,
    /// Hypothetical activity count to simulate
    #[arg(long)]
    pub(crate) simulate_activities: Option<i64>,
    /// Hypothetical volunteer hours to simulate
    #[arg(long)]
    pub(crate) simulate_volunteer_hours: Option<f64>,
    /// Tier the improvement plan aims for (fit, challenge, unlikely)
    #[arg(long, default_value_t = FitTier::Fit)]
    pub(crate) target_tier: FitTier,
    /// Plan start date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        target_tier,
        simulate_activities,
        today,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let config = AppConfig::load()?;

    let (records, schools, targets) = seeded_readers();
    let service = AdmissionFitService::new(
        Arc::new(records),
        Arc::new(schools),
        Arc::new(targets),
        config.fit,
    );
    let student = StudentId(DEMO_STUDENT.to_string());
    let input = SimulationInput {
        hypothetical_activities: simulate_activities,
        ..SimulationInput::default()
    };

    println!("Admission fit demo for student {}", student);
    let simulations = service.simulate_all_targets(&student, input).await?;
    for target in &simulations {
        println!(
            "\n#{} {} ({})",
            target.priority, target.school_name, target.school_id
        );
        print_lines(&simulation_lines(&target.result));
    }

    let Some(top) = simulations.first() else {
        println!("No target schools on file");
        return Ok(());
    };

    println!("\nScenarios for {}", top.school_name);
    let comparison = service.compare_scenarios(&student, &top.school_id).await?;
    print_lines(&scenario_lines(&comparison));

    println!("\nImprovement plan for {}", top.school_name);
    let plan = service
        .improvement_plan(&student, &top.school_id, target_tier, today)
        .await?;
    print_lines(&plan_lines(&plan));

    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let config = AppConfig::load()?;
    let engine = FitEngine::new(config.fit);

    let grades = GradeCsvImporter::from_path(&args.grades_csv)?;
    println!(
        "Loaded {} grade rows from {}",
        grades.len(),
        args.grades_csv.display()
    );
    let records = records_from_args(grades, &args);

    let input = SimulationInput {
        hypothetical_activities: args.simulate_activities,
        hypothetical_volunteer_hours: args.simulate_volunteer_hours,
        ..SimulationInput::default()
    };
    let result = simulate(&engine, &records, args.cutoff, &input);
    println!("\nSimulation");
    print_lines(&simulation_lines(&result));

    println!("\nScenarios");
    print_lines(&scenario_lines(&compare_scenarios(
        &engine,
        &records,
        args.cutoff,
    )));

    println!("\nImprovement plan");
    let plan = build_plan(
        &engine,
        &records.snapshot(),
        args.cutoff,
        args.target_tier,
        today,
    );
    print_lines(&plan_lines(&plan));

    Ok(())
}

/// Expands the counts given on the command line into record entries.
pub(crate) fn records_from_args(grades: Vec<GradeEntry>, args: &EvaluateArgs) -> StudentRecords {
    let activities = (1..=args.activities)
        .map(|index| ActivityEntry {
            title: format!("Activity {index}"),
        })
        .collect();

    let volunteer = if args.volunteer_hours > 0.0 {
        vec![VolunteerEntry {
            organization: "Reported hours".to_string(),
            hours: args.volunteer_hours,
        }]
    } else {
        Vec::new()
    };

    StudentRecords {
        grades,
        activities,
        volunteer,
        attendance: vec![AttendanceEntry {
            unexcused_absences: args.absences,
            lateness: 0,
        }],
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn score_line(label: &str, view: &ScoreView) -> String {
    format!(
        "- {label}: {:.1} {} ({:.0}% admission probability) | grades {:.1}, activities {:.1}, volunteer {:.1}, attendance {:.1}",
        view.composite_score,
        view.tier,
        view.probability,
        view.sub_scores.grade,
        view.sub_scores.activity,
        view.sub_scores.volunteer,
        view.sub_scores.attendance
    )
}

pub(crate) fn simulation_lines(result: &SimulationResult) -> Vec<String> {
    let mut lines = vec![
        format!("- Fit threshold {:.1}", result.threshold),
        score_line("Baseline", &result.baseline),
        score_line("Simulated", &result.simulated),
        format!(
            "- Change {:+.1}{}",
            result.score_delta,
            if result.level_changed {
                format!(" ({} -> {})", result.baseline.tier, result.simulated.tier)
            } else {
                String::new()
            }
        ),
    ];

    lines.extend(result.change_factors.iter().map(|factor| {
        format!(
            "  - {}: {:+.1} ({})",
            factor.category.label(),
            factor.impact,
            factor.description
        )
    }));
    lines.extend(
        result
            .recommendations
            .iter()
            .map(|recommendation| format!("  * {recommendation}")),
    );
    lines
}

pub(crate) fn scenario_lines(comparison: &ScenarioComparison) -> Vec<String> {
    let mut lines = vec![score_line("Baseline", &comparison.baseline)];
    lines.extend(comparison.scenarios.iter().map(|outcome| {
        format!(
            "- {}: {:.1} {} ({:+.1})",
            outcome.label,
            outcome.result.simulated.composite_score,
            outcome.result.simulated.tier,
            outcome.improvement
        )
    }));
    lines
}

pub(crate) fn plan_lines(plan: &ImprovementPlan) -> Vec<String> {
    let mut lines = vec![format!(
        "- {} -> {}: {:.1} now, {:.1} needed (gap {:.1})",
        plan.current_tier, plan.target_tier, plan.current_score, plan.target_score, plan.gap
    )];
    lines.push(format!(
        "- About {} weeks, projected by {}",
        plan.estimated_weeks, plan.projected_completion
    ));
    lines.extend(plan.suggestions.iter().map(|suggestion| {
        format!(
            "  {}. [{} / {:?}] {}",
            suggestion.priority,
            suggestion.category.label(),
            suggestion.difficulty,
            suggestion.description
        )
    }));
    lines
}
