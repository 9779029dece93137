//! Behaviour tests for lecturer creation and student assignment.
//!
//! Scenarios drive the roster service over the in-memory identity store, so
//! they run without a database. Steps are synchronous and share one Tokio
//! runtime held by the world.

use std::cell::RefCell;

use roster::domain::{
    Lecturer, LecturerId, PersonName, RosterError, RosterService, Student, StudentId,
    StudentWithLecturers,
};
use roster::outbound::memory::InMemoryRosterStore;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::sync::Arc;
use tokio::runtime::Runtime;

struct RosterWorld {
    runtime: Runtime,
    service: RosterService<InMemoryRosterStore>,
    last_creation: RefCell<Option<Result<Lecturer, RosterError>>>,
    last_assignment: RefCell<Option<Result<StudentWithLecturers, RosterError>>>,
}

impl RosterWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("test runtime");
        Self {
            runtime,
            service: RosterService::new(Arc::new(InMemoryRosterStore::new())),
            last_creation: RefCell::new(None),
            last_assignment: RefCell::new(None),
        }
    }

    fn create(&self, id: &str, name: &str, surname: &str) -> Result<Lecturer, RosterError> {
        self.runtime.block_on(self.service.create_lecturer(
            person(name),
            person(surname),
            LecturerId::new(id).expect("valid lecturer id"),
        ))
    }

    fn assign_error(&self) -> RosterError {
        match self.last_assignment.borrow().as_ref() {
            Some(Err(error)) => error.clone(),
            Some(Ok(view)) => panic!("expected the assignment to fail, got {view:?}"),
            None => panic!("no assignment attempted"),
        }
    }
}

fn person(raw: &str) -> PersonName {
    PersonName::new(raw).expect("valid person name")
}

fn parse_ids(raw: &str) -> Vec<String> {
    if raw == "none" {
        return Vec::new();
    }
    raw.split(',').map(str::to_owned).collect()
}

#[fixture]
fn world() -> RosterWorld {
    RosterWorld::new()
}

#[given("an empty roster")]
fn an_empty_roster(world: &RosterWorld) {
    assert!(world.last_assignment.borrow().is_none());
}

#[given("lecturer {id} called {name} {surname} exists")]
fn lecturer_exists(world: &RosterWorld, id: String, name: String, surname: String) {
    world
        .create(&id, &name, &surname)
        .expect("lecturer creation should succeed");
}

#[when("lecturer {id} called {name} {surname} is created")]
fn lecturer_is_created(world: &RosterWorld, id: String, name: String, surname: String) {
    let outcome = world.create(&id, &name, &surname);
    *world.last_creation.borrow_mut() = Some(outcome);
}

#[when("student {student} called {name} {surname} is assigned to {lecturer}")]
fn student_is_assigned(
    world: &RosterWorld,
    student: String,
    name: String,
    surname: String,
    lecturer: String,
) {
    let outcome = world
        .runtime
        .block_on(world.service.assign_student_to_lecturer(
            LecturerId::new(lecturer).expect("valid lecturer id"),
            person(&name),
            person(&surname),
            StudentId::new(student).expect("valid student id"),
        ));
    *world.last_assignment.borrow_mut() = Some(outcome);
}

#[then("the assignment succeeds")]
fn the_assignment_succeeds(world: &RosterWorld) {
    let last = world.last_assignment.borrow();
    let outcome = last.as_ref().expect("an assignment was attempted");
    assert!(outcome.is_ok(), "assignment failed: {outcome:?}");
}

#[then("the assignment fails because the student is already assigned")]
fn fails_already_assigned(world: &RosterWorld) {
    assert!(matches!(
        world.assign_error(),
        RosterError::StudentAlreadyAssigned(_)
    ));
}

#[then("the assignment fails because of an identity conflict")]
fn fails_identity_conflict(world: &RosterWorld) {
    assert!(matches!(
        world.assign_error(),
        RosterError::StudentIdentityConflict(_)
    ));
}

#[then("the assignment fails because the lecturer is missing")]
fn fails_lecturer_missing(world: &RosterWorld) {
    assert!(matches!(
        world.assign_error(),
        RosterError::LecturerNotFound(_)
    ));
}

#[then("the creation fails because the lecturer already exists")]
fn creation_conflicts(world: &RosterWorld) {
    let last = world.last_creation.borrow();
    assert!(matches!(
        last.as_ref(),
        Some(Err(RosterError::LecturerAlreadyExists(_)))
    ));
}

#[then("lecturer {id} lists students {ids}")]
fn lecturer_lists_students(world: &RosterWorld, id: String, ids: String) {
    let view = world
        .runtime
        .block_on(
            world
                .service
                .get_lecturer_by_id(&LecturerId::new(id).expect("valid lecturer id")),
        )
        .expect("lecturer should exist");
    let listed: Vec<String> = view
        .students
        .iter()
        .map(|student: &Student| student.id().to_string())
        .collect();
    assert_eq!(listed, parse_ids(&ids));
}

#[then("student {id} lists lecturers {ids}")]
fn student_lists_lecturers(world: &RosterWorld, id: String, ids: String) {
    let view = world
        .runtime
        .block_on(
            world
                .service
                .get_student_by_id(&StudentId::new(id).expect("valid student id")),
        )
        .expect("student should exist");
    let listed: Vec<String> = view
        .lecturers
        .iter()
        .map(|lecturer| lecturer.id().to_string())
        .collect();
    assert_eq!(listed, parse_ids(&ids));
}

#[then("student {id} does not exist")]
fn student_does_not_exist(world: &RosterWorld, id: String) {
    let outcome = world.runtime.block_on(
        world
            .service
            .get_student_by_id(&StudentId::new(id).expect("valid student id")),
    );
    assert!(matches!(outcome, Err(RosterError::StudentNotFound(_))));
}

#[scenario(
    path = "tests/features/roster_assignment.feature",
    name = "Students are reused across lecturers"
)]
fn students_are_reused_across_lecturers(world: RosterWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/roster_assignment.feature",
    name = "Lecturer identifiers are unique"
)]
fn lecturer_identifiers_are_unique(world: RosterWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/roster_assignment.feature",
    name = "A missing lecturer takes precedence over an identity conflict"
)]
fn missing_lecturer_takes_precedence(world: RosterWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/roster_assignment.feature",
    name = "A rejected first assignment creates no student"
)]
fn rejected_first_assignment_creates_no_student(world: RosterWorld) {
    drop(world);
}
