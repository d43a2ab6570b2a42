//! Booking Walkthrough
//!
//! Walks one appointment through its whole life against a doctor's weekly
//! schedule, printing every decision.
//!
//! Key concepts:
//! - Building a weekly schedule
//! - Requesting, approving, postponing and completing an appointment
//! - Availability rejections and capability checks
//! - Saving the practice as a snapshot
//!
//! Run with: cargo run --example booking_walkthrough
//! Set RUST_LOG=debug to see the library's own tracing output.

use appointment_core::availability::AvailabilityValidator;
use appointment_core::book::AppointmentBook;
use appointment_core::config::SchedulingConfig;
use appointment_core::core::{DoctorId, PatientId};
use appointment_core::lifecycle::{AppointmentRequest, AppointmentStateMachine, Capability};
use appointment_core::schedule::{DayOfWeek, WeeklySchedule};
use appointment_core::snapshot::PracticeSnapshot;
use chrono::{NaiveDate, NaiveTime};

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Booking Walkthrough ===\n");

    let doctor = DoctorId::new();
    let patient = PatientId::new();
    let schedule = WeeklySchedule::builder(doctor)
        .days(
            [DayOfWeek::Monday, DayOfWeek::Wednesday],
            hm(9, 0),
            hm(12, 0),
        )
        .block(DayOfWeek::Monday, hm(14, 0), hm(17, 0))
        .build()?;
    println!("Doctor {} works:", doctor);
    for block in schedule.blocks() {
        println!("  {} {}-{}", block.day(), block.start(), block.end());
    }

    let config = SchedulingConfig::from_env();
    let now = NaiveDate::from_ymd_opt(2030, 3, 1)
        .expect("valid date")
        .and_time(hm(8, 0));
    let machine = AppointmentStateMachine::new(config, now)?;
    let monday = NaiveDate::from_ymd_opt(2030, 3, 4).expect("valid date");
    let mut book = AppointmentBook::new();

    println!("\n1. Patient requests {}", monday);
    let requested = machine.request(AppointmentRequest::new(
        doctor,
        patient,
        monday,
        "Recurring headaches",
    ))?;
    book.upsert(requested.clone());
    println!("   -> {} ({})", requested.state(), requested.id());

    println!("\n2. Doctor tries 11:45, which runs past the morning block");
    match machine.approve(
        &requested,
        hm(11, 45),
        &Capability::doctor_of_record(),
        &AvailabilityValidator::new(&schedule, &book),
    ) {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   refused: {}", e),
    }

    println!("\n3. Doctor approves 10:30");
    let scheduled = machine.approve(
        &requested,
        hm(10, 30),
        &Capability::doctor_of_record(),
        &AvailabilityValidator::new(&schedule, &book),
    )?;
    book.upsert(scheduled.clone());
    println!(
        "   -> {} at {}",
        scheduled.state(),
        scheduled.time().as_datetime()
    );

    println!("\n4. A stranger tries to reject it");
    match machine.reject(&scheduled, &Capability::NONE) {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   refused: {}", e),
    }

    println!("\n5. Doctor postpones to the afternoon");
    let moved = machine.postpone(
        &scheduled,
        monday.and_time(hm(14, 30)),
        &Capability::doctor_of_record(),
        &AvailabilityValidator::new(&schedule, &book),
    )?;
    book.upsert(moved.clone());
    println!("   -> {} at {}", moved.state(), moved.time().as_datetime());

    println!("\n6. Visit completed");
    let completed = machine.complete(&moved, &Capability::doctor_of_record())?;
    book.upsert(completed.clone());
    for record in completed.history().records() {
        let from = record
            .from
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let notify = if record.transition.notifies_patient() {
            " (notify patient)"
        } else {
            ""
        };
        println!("   {} --{}--> {}{}", from, record.transition, record.to, notify);
    }

    println!("\n7. Saving practice snapshot");
    let snapshot = PracticeSnapshot::new(schedule, book, now);
    let json = snapshot.to_json()?;
    let bytes = snapshot.to_bytes()?;
    println!("   JSON: {} bytes, bincode: {} bytes", json.len(), bytes.len());
    let restored = PracticeSnapshot::from_bytes(&bytes)?;
    println!(
        "   restored {} appointment(s), {} completed",
        restored.book.len(),
        restored.book.completed_for(doctor).len()
    );

    println!("\n=== Done ===");
    Ok(())
}
