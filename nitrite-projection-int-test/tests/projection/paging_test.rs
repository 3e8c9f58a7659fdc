use crate::projection::{generate_employee_records, sub_employee, SubEmployee};
use nitrite_projection::collection::{limit_to, skip_by, FindOptions};
use nitrite_projection::common::{ConvertibleMapper, RecordIterable};
use nitrite_projection_int_test::test_util::{create_test_context, run_test};

#[test]
fn test_projection_has_more() {
    let employees = generate_employee_records(10);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let first_page = ctx
                .page(limit_to(4))
                .project::<SubEmployee, _>(ConvertibleMapper);
            assert!(first_page.has_more());

            let last_page = ctx
                .page(skip_by(8).limit(4))
                .project::<SubEmployee, _>(ConvertibleMapper);
            assert!(!last_page.has_more());

            let everything = ctx.cursor().project::<SubEmployee, _>(ConvertibleMapper);
            assert!(!everything.has_more());
            Ok(())
        },
    );
}

#[test]
fn test_projection_size() {
    let employees = generate_employee_records(10);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let page = ctx
                .page(skip_by(2).limit(5))
                .project::<SubEmployee, _>(ConvertibleMapper);
            assert_eq!(page.size(), 5);
            assert_eq!(page.to_list()?.len(), page.size());

            let tail = ctx
                .page(skip_by(7).limit(5))
                .project::<SubEmployee, _>(ConvertibleMapper);
            assert_eq!(tail.size(), 3);
            Ok(())
        },
    );
}

#[test]
fn test_projection_total_count() {
    let employees = generate_employee_records(10);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let page = ctx
                .page(FindOptions::new().skip(3).limit(2))
                .project::<SubEmployee, _>(ConvertibleMapper);
            assert_eq!(page.total_count(), 10);
            assert_eq!(page.size(), 2);
            Ok(())
        },
    );
}

#[test]
fn test_projection_page_contents() {
    let employees = generate_employee_records(10);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let page = ctx
                .page(skip_by(4).limit(3))
                .project::<SubEmployee, _>(ConvertibleMapper);

            let expected: Vec<SubEmployee> = employees[4..7].iter().map(sub_employee).collect();
            assert_eq!(page.to_list()?, expected);
            assert_eq!(page.first()?, Some(sub_employee(&employees[4])));
            Ok(())
        },
    );
}

#[test]
fn test_walk_all_pages() {
    let employees = generate_employee_records(11);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let mut collected = Vec::new();
            let mut skip = 0;
            loop {
                let page = ctx
                    .page(skip_by(skip).limit(3))
                    .project::<SubEmployee, _>(ConvertibleMapper);
                collected.extend(page.to_list()?);
                if !page.has_more() {
                    break;
                }
                skip += page.size() as u64;
            }

            let expected: Vec<SubEmployee> = employees.iter().map(sub_employee).collect();
            assert_eq!(collected, expected);
            Ok(())
        },
    );
}

#[test]
fn test_projection_skip_past_end() {
    let employees = generate_employee_records(3);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let page = ctx
                .page(skip_by(10))
                .project::<SubEmployee, _>(ConvertibleMapper);
            assert_eq!(page.size(), 0);
            assert_eq!(page.total_count(), 3);
            assert!(!page.has_more());
            assert_eq!(page.first()?, None);
            Ok(())
        },
    );
}
