//! Sample records for mock-data mode.
//!
//! Seeds a small, fixed set of projects and tasks, one task per
//! recurrence kind, so the app can be exercised without any real
//! data on disk.

use chrono::NaiveDate;

use super::preferences::{PreferenceBackend, PreferenceKey, StoreError};
use crate::project::{Project, ProjectList};
use crate::recurrence::Recurrence;
use crate::task::Task;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // The mock calendar is fixed; these literals are all valid.
    NaiveDate::from_ymd_opt(y, m, d).expect("valid mock date")
}

/// Build the sample records: two projects, five tasks covering every
/// recurrence kind.
pub fn sample_records() -> (ProjectList, Vec<Project>, Vec<Task>) {
    let mut home = Project::new("Home", "#3d7a5d").expect("valid mock project");
    let mut admin = Project::new("Admin", "#7a3d5d").expect("valid mock project");

    let mut water_plants = Task::new(
        "Water the plants",
        date(2024, 1, 1),
        Recurrence::every_num_days(3).expect("valid mock rule"),
    )
    .expect("valid mock task");
    water_plants.set_notes("Succulents only every other time");

    let recycling = Task::new(
        "Take out recycling",
        date(2024, 1, 1),
        // Tuesdays and Fridays
        Recurrence::every_days_of_week([2, 5]).expect("valid mock rule"),
    )
    .expect("valid mock task");

    let rent = Task::new(
        "Pay rent",
        date(2024, 1, 1),
        Recurrence::every_days_of_month([1]).expect("valid mock rule"),
    )
    .expect("valid mock task");

    let passport = Task::new("Renew passport", date(2024, 2, 10), Recurrence::Single)
        .expect("valid mock task");

    let dentist = Task::new(
        "Dentist check-up",
        date(2024, 1, 15),
        Recurrence::on_dates([date(2024, 3, 12), date(2024, 9, 10)]),
    )
    .expect("valid mock task");

    home.add_task(water_plants.id());
    home.add_task(recycling.id());
    admin.add_task(rent.id());
    admin.add_task(passport.id());
    admin.add_task(dentist.id());

    let mut list = ProjectList::new("user-0000");
    list.add_project(home.id());
    list.add_project(admin.id());

    (
        list,
        vec![home, admin],
        vec![water_plants, recycling, rent, passport, dentist],
    )
}

/// Write the sample records into `backend`, replacing whatever is
/// there.
pub async fn seed(backend: &dyn PreferenceBackend) -> Result<(), StoreError> {
    let (list, projects, tasks) = sample_records();
    backend
        .set(PreferenceKey::ProjectList, serde_json::to_string(&list)?)
        .await?;
    backend
        .set(PreferenceKey::Projects, serde_json::to_string(&projects)?)
        .await?;
    backend
        .set(PreferenceKey::Tasks, serde_json::to_string(&tasks)?)
        .await?;
    Ok(())
}
