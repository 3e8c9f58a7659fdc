use crate::projection::{generate_employee_records, sub_employee, Employee, SubEmployee};
use nitrite_projection::collection::Document;
use nitrite_projection::common::{
    ConvertibleMapper, ProjectedObjectIterable, RecordIterable, Value, DOC_ID,
    REMOVE_ON_PROJECTED_ITERATOR_NOT_SUPPORTED,
};
use nitrite_projection::doc;
use nitrite_projection::errors::ErrorKind;
use nitrite_projection_int_test::test_util::{
    create_document_context, create_test_context, run_test,
};

#[test]
fn test_project_to_sub_type() {
    let employees = generate_employee_records(10);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let projected = ctx.cursor().project::<SubEmployee, _>(ConvertibleMapper);
            let subs = projected.to_list()?;

            let expected: Vec<SubEmployee> = employees.iter().map(sub_employee).collect();
            assert_eq!(subs, expected);
            Ok(())
        },
    );
}

#[test]
fn test_project_to_full_type() {
    let employees = generate_employee_records(5);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let projected = ctx.cursor().project::<Employee, _>(ConvertibleMapper);
            assert_eq!(projected.to_list()?, employees);
            Ok(())
        },
    );
}

#[test]
fn test_project_to_document_strips_id() {
    let employees = generate_employee_records(3);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let cursor = ctx.cursor();
            let projected = ProjectedObjectIterable::<_, _, Document>::new(ConvertibleMapper, &cursor);

            for doc in projected.iter() {
                let doc = doc?;
                assert!(!doc.has_id());
                assert_eq!(doc.get(DOC_ID)?, Value::Null);
                assert!(doc.contains_key("emp_id"));
            }

            // the source still carries its ids
            for record in cursor.iter() {
                assert!(record?.has_id());
            }
            Ok(())
        },
    );
}

#[test]
fn test_projection_is_lazy_and_re_iterable() {
    let employees = generate_employee_records(4);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let projected = ctx.cursor().project::<SubEmployee, _>(ConvertibleMapper);

            let mut iter = projected.iter();
            assert!(iter.has_next());
            let first = iter.try_next()?;
            assert_eq!(first, sub_employee(&employees[0]));

            let full_pass = projected.to_list()?;
            assert_eq!(full_pass.len(), 4);
            assert_eq!(full_pass[0], first);

            assert_eq!(iter.count(), 3);
            Ok(())
        },
    );
}

#[test]
fn test_projection_first() {
    let employees = generate_employee_records(3);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let projected = ctx.cursor().project::<SubEmployee, _>(ConvertibleMapper);
            assert_eq!(projected.first()?, Some(sub_employee(&employees[0])));
            assert_eq!(projected.first_or_default()?, sub_employee(&employees[0]));
            Ok(())
        },
    );
}

#[test]
fn test_projection_of_empty_result() {
    run_test(
        || create_document_context(vec![]),
        |ctx| {
            let projected = ctx.cursor().project::<SubEmployee, _>(ConvertibleMapper);
            assert_eq!(projected.first()?, None);
            assert_eq!(projected.first_or_default()?, SubEmployee::default());
            assert!(projected.to_list()?.is_empty());
            assert_eq!(projected.size(), 0);
            assert_eq!(projected.total_count(), 0);
            assert!(!projected.has_more());

            let mut iter = projected.iter();
            assert_eq!(iter.remove().unwrap_err().kind(), &ErrorKind::InvalidOperation);
            assert!(!iter.has_next());
            assert_eq!(iter.try_next().unwrap_err().kind(), &ErrorKind::IteratorExhausted);

            let error = iter.remove().unwrap_err();
            assert_eq!(error.kind(), &ErrorKind::InvalidOperation);
            assert_eq!(error.message(), REMOVE_ON_PROJECTED_ITERATOR_NOT_SUPPORTED);
            Ok(())
        },
    );
}

#[test]
fn test_projection_mapping_failure() {
    let documents = vec![
        doc!{ emp_id: 1u64, address: "first" },
        doc!{ emp_id: "not a number", address: "second" },
        doc!{ emp_id: 3u64, address: "third" },
    ];
    run_test(
        || create_document_context(documents.clone()),
        |ctx| {
            let projected = ctx.cursor().project::<SubEmployee, _>(ConvertibleMapper);

            let error = projected.to_list().unwrap_err();
            assert_eq!(error.kind(), &ErrorKind::ObjectMappingError);
            assert!(error.message().contains("emp_id"));
            assert!(projected.try_to_string().is_err());

            let results: Vec<_> = projected.iter().collect();
            assert_eq!(results.len(), 3);
            assert!(results[0].is_ok());
            assert!(results[1].is_err());
            assert!(results[2].is_ok());

            // the failing record is left as it was
            let record = ctx.cursor().iter().nth(1).unwrap()?;
            assert!(record.has_id());
            assert_eq!(record.get("emp_id")?, Value::from("not a number"));
            Ok(())
        },
    );
}

#[test]
fn test_projection_remove_rejected() {
    let employees = generate_employee_records(2);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let projected = ctx.cursor().project::<SubEmployee, _>(ConvertibleMapper);

            let mut iter = projected.iter();
            let error = iter.remove().unwrap_err();
            assert_eq!(error.kind(), &ErrorKind::InvalidOperation);
            assert_eq!(error.message(), REMOVE_ON_PROJECTED_ITERATOR_NOT_SUPPORTED);

            iter.next();
            assert!(iter.remove().is_err());
            assert_eq!(projected.total_count(), 2);
            assert_eq!(projected.to_list()?.len(), 2);
            Ok(())
        },
    );
}

#[test]
fn test_projection_to_string() {
    let employees = generate_employee_records(2);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let projected = ctx.cursor().project::<SubEmployee, _>(ConvertibleMapper);
            let expected: Vec<SubEmployee> = employees.iter().map(sub_employee).collect();
            assert_eq!(projected.to_string(), format!("{:?}", expected));
            Ok(())
        },
    );
}

#[test]
fn test_concurrent_projections() {
    let employees = generate_employee_records(50);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let cursor = ctx.cursor();
                    std::thread::spawn(move || {
                        cursor
                            .project::<SubEmployee, _>(ConvertibleMapper)
                            .to_list()
                    })
                })
                .collect();

            let expected: Vec<SubEmployee> = employees.iter().map(sub_employee).collect();
            for handle in handles {
                let subs = handle.join().unwrap()?;
                assert_eq!(subs, expected);
            }
            Ok(())
        },
    );
}
