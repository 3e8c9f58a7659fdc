use crate::projection::{generate_employee_records, Employee};
use nitrite_projection::collection::Document;
use nitrite_projection::common::{
    ConvertibleMapper, NitriteMapper, ProjectedObjectIterable, RecordIterable, Value,
};
use nitrite_projection::errors::{ErrorKind, NitriteError, NitriteResult};
use nitrite_projection_int_test::test_util::{create_test_context, run_test};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Reads the email address of an employee record.
struct EmailMapper;

impl NitriteMapper<String> for EmailMapper {
    fn convert(&self, document: &Document) -> NitriteResult<String> {
        match document.get("email_address")? {
            Value::String(email) => Ok(email),
            other => Err(NitriteError::new(
                &format!("Expected an email address, found {}", other),
                ErrorKind::ObjectMappingError,
            )),
        }
    }
}

/// Counts conversions and checks the record it receives.
#[derive(Default)]
struct CountingMapper {
    calls: AtomicUsize,
}

impl NitriteMapper<Employee> for CountingMapper {
    fn convert(&self, document: &Document) -> NitriteResult<Employee> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if document.has_id() {
            return Err(NitriteError::new(
                "Mapper received a record with an id",
                ErrorKind::InternalError,
            ));
        }
        ConvertibleMapper.convert(document)
    }
}

#[test]
fn test_custom_mapper() {
    let employees = generate_employee_records(5);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let emails = ctx.cursor().project::<String, _>(EmailMapper);
            let expected: Vec<String> = employees
                .iter()
                .filter_map(|e| e.email_address.clone())
                .collect();
            assert_eq!(emails.to_list()?, expected);
            Ok(())
        },
    );
}

#[test]
fn test_mapper_called_once_per_pulled_record() {
    let employees = generate_employee_records(6);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let mapper = CountingMapper::default();
            let projected = ProjectedObjectIterable::<_, _, Employee>::new(&mapper, ctx.cursor());

            assert_eq!(projected.size(), 6);
            assert_eq!(mapper.calls.load(Ordering::SeqCst), 0);

            let _ = projected.first()?;
            assert_eq!(mapper.calls.load(Ordering::SeqCst), 1);

            let taken: Vec<Employee> = projected
                .iter()
                .take(2)
                .collect::<NitriteResult<Vec<_>>>()?;
            assert_eq!(taken.len(), 2);
            assert_eq!(mapper.calls.load(Ordering::SeqCst), 3);

            assert_eq!(projected.to_list()?, employees);
            assert_eq!(mapper.calls.load(Ordering::SeqCst), 9);
            Ok(())
        },
    );
}

#[test]
fn test_shared_mapper() {
    let employees = generate_employee_records(3);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let mapper = Arc::new(CountingMapper::default());
            let first = ctx.cursor().project::<Employee, _>(mapper.clone());
            let second = ctx.cursor().project::<Employee, _>(mapper.clone());

            assert_eq!(first.to_list()?, second.to_list()?);
            assert_eq!(mapper.calls.load(Ordering::SeqCst), 6);
            Ok(())
        },
    );
}

#[test]
fn test_boxed_mapper() {
    let employees = generate_employee_records(2);
    run_test(
        || create_test_context(&employees),
        |ctx| {
            let mapper: Box<dyn NitriteMapper<Employee>> = Box::new(ConvertibleMapper);
            let projected = ctx.cursor().project::<Employee, _>(mapper);
            assert_eq!(projected.to_list()?, employees);
            Ok(())
        },
    );
}
