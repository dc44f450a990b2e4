// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job assembly from parsed submissions.

use chrono::{DateTime, Utc};
use relay_core::{job_id, Command, Coverage, Cpu, Host, Job, Os};

use crate::attachment;
use crate::build;
use crate::configure;
use crate::coverage;
use crate::submission::{Done, Site, Update};
use crate::testing;

/// Commands of one section plus its phase window.
pub struct TimedCommands {
    pub commands: Vec<Command>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimedCommands {
    pub fn new(start: i64, end: i64) -> Self {
        TimedCommands {
            commands: Vec::new(),
            start: DateTime::from_timestamp(start, 0),
            end: DateTime::from_timestamp(end, 0),
        }
    }
}

/// Coverage entries of one section plus its phase window.
pub struct TimedCoverage {
    pub files: Vec<Coverage>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimedCoverage {
    pub fn new(start: i64, end: i64) -> Self {
        TimedCoverage {
            files: Vec::new(),
            start: DateTime::from_timestamp(start, 0),
            end: DateTime::from_timestamp(end, 0),
        }
    }
}

pub fn assemble_site(site: &Site, project: &str) -> Job {
    let mut job = Job {
        job_id: job_id(project, &site.name, &site.build_stamp, &site.build_name),
        project: project.to_string(),
        build_name: site.build_name.clone(),
        build_group: build_group(&site.build_stamp),
        change_id: site.change_id.clone(),
        generator: site.generator.clone(),
        host: host_record(site),
        ..Job::default()
    };

    if let Some(cfg) = &site.configure {
        let ret = configure::parse_section(cfg, &site.generator);
        job.start_configure_time = ret.start;
        job.end_configure_time = ret.end;
        job.commands.extend(ret.commands);
    }
    if let Some(bld) = &site.build {
        let ret = build::parse_section(bld);
        job.start_build_time = ret.start;
        job.end_build_time = ret.end;
        job.commands.extend(ret.commands);
    }
    if let Some(tst) = &site.testing {
        let ret = testing::parse_section(tst, &site.subprojects);
        job.start_test_time = ret.start;
        job.end_test_time = ret.end;
        job.commands.extend(ret.commands);
    }
    if let Some(cov) = &site.coverage {
        let ret = coverage::parse_summary(cov);
        job.start_coverage_time = ret.start;
        job.end_coverage_time = ret.end;
        job.coverage.extend(ret.files);
    }
    if let Some(log) = &site.coverage_log {
        let ret = coverage::parse_log(log);
        job.start_coverage_time = ret.start;
        job.end_coverage_time = ret.end;
        job.coverage.extend(ret.files);
    }
    if let Some(da) = &site.dynamic_analysis {
        let ret = testing::parse_dynamic_analysis(da);
        job.start_memcheck_time = ret.start;
        job.end_memcheck_time = ret.end;
        job.commands.extend(ret.commands);
    }
    job.attached_files.extend(attachment::from_notes(&site.notes));
    job.attached_files.extend(attachment::from_uploads(&site.uploads));

    job
}

pub fn assemble_update(update: &Update, project: &str) -> Job {
    Job {
        job_id: job_id(project, &update.site, &update.build_stamp, &update.build_name),
        project: project.to_string(),
        build_name: update.build_name.clone(),
        change_id: update.revision.clone(),
        start_update_time: DateTime::from_timestamp(update.start_time, 0),
        end_update_time: DateTime::from_timestamp(update.end_time, 0),
        ..Job::default()
    }
}

pub fn assemble_done(done: &Done, project: &str) -> Job {
    Job {
        job_id: done.build_id.clone(),
        project: project.to_string(),
        done: true,
        ..Job::default()
    }
}

fn host_record(site: &Site) -> Option<Host> {
    // Submissions without hardware attributes (Update-style or pruned
    // Site files) carry no vendor string; no host record then.
    if site.vendor_string.is_empty() {
        return None;
    }
    Some(Host {
        site: site.name.clone(),
        name: site.hostname.clone(),
        cpu: Cpu {
            vendor: site.vendor_string.clone(),
            vendor_id: site.vendor_id.clone(),
            family_id: site.family_id,
            model_id: site.model_id,
            model_name: model_name(site),
            logical_cores: site.logical_cpus,
            physical_cores: site.physical_cpus,
            cache_size: site.processor_cache_size,
        },
        os: Os {
            name: site.os_name.clone(),
            release: site.os_release.clone(),
            version: site.os_version.clone(),
            platform: site.os_platform.clone(),
        },
        physical_memory: site.physical_memory,
        virtual_memory: site.virtual_memory,
    })
}

/// Older clients report an empty model name, newer ones pad it with
/// whitespace; both get the reading the current tooling would produce.
fn model_name(site: &Site) -> String {
    if site.model_name.is_empty() {
        format!("Some {} CPU", site.vendor_id)
    } else {
        site.model_name.trim().to_string()
    }
}

/// The build group is the third dash-separated field of the stamp
/// (`20260829-0100-Nightly` submits to `Nightly`).
fn build_group(stamp: &str) -> String {
    let mut fields = stamp.splitn(3, '-');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(_), Some(_), Some(group)) => group.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "site_tests.rs"]
mod tests;
