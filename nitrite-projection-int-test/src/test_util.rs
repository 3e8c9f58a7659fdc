use nitrite_projection::collection::{Document, FindOptions};
use nitrite_projection::common::{Convertible, ConvertibleMapper, DocumentCursor, RecordIterable};
use nitrite_projection::errors::NitriteResult;
use std::backtrace::Backtrace;
use std::time::Instant;

/// Runs a test against a context built by `before`.
///
/// Errors and panics are reported with the time taken and a backtrace before
/// the test is failed.
pub fn run_test<T, B>(before: B, test: T)
where
    T: Fn(TestContext) -> NitriteResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> NitriteResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let start_time = Instant::now();

    let result = std::panic::catch_unwind(|| {
        let backtrace = Backtrace::capture();
        match before() {
            Ok(ctx) => test(ctx)
                .map_err(|e| (format!("Test failed: {:?}", e), backtrace.to_string())),
            Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
        }
    });

    let elapsed = start_time.elapsed();

    let (error, backtrace) = match result {
        Ok(Ok(_)) => return,
        Ok(Err((e, bt))) => (e, bt),
        Err(panic_err) => {
            let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            (format!("Panic: {}", err_msg), Backtrace::capture().to_string())
        }
    };

    eprintln!("\n==================== TEST FAILED ====================");
    eprintln!("Failed after {:?}", elapsed);
    eprintln!("Error: {}", error);
    if !backtrace.is_empty() && !backtrace.contains("disabled") {
        eprintln!("\nBacktrace:\n{}", backtrace);
    }
    eprintln!("=====================================================\n");

    panic!("Test failed: {}", error);
}

/// A stored result set, the source every projection test reads from.
#[derive(Clone)]
pub struct TestContext {
    cursor: DocumentCursor,
}

impl TestContext {
    pub fn new(cursor: DocumentCursor) -> Self {
        Self { cursor }
    }

    /// Cursor over the whole result set.
    pub fn cursor(&self) -> DocumentCursor {
        self.cursor.clone()
    }

    /// Cursor over one page of the result set.
    pub fn page(&self, find_options: FindOptions) -> DocumentCursor {
        self.cursor.page(find_options)
    }
}

/// Builds a context whose result set holds `objects` in order.
pub fn create_test_context<T: Convertible>(objects: &[T]) -> NitriteResult<TestContext> {
    let mapper = ConvertibleMapper::new();
    let documents = objects
        .iter()
        .map(|object| mapper.to_document(object))
        .collect::<NitriteResult<Vec<Document>>>()?;
    create_document_context(documents)
}

/// Builds a context whose result set holds `documents` in order.
pub fn create_document_context(documents: Vec<Document>) -> NitriteResult<TestContext> {
    let cursor = DocumentCursor::all(documents)?;
    log::debug!("Created test context with {} records", cursor.total_count());
    Ok(TestContext::new(cursor))
}
