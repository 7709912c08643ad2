use crate::error::StampError;

/// What a batch loop does after an item fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and move on to the next item
    #[default]
    Continue,
    /// Record the failure and stop; remaining items are not attempted
    Abort,
}

/// Result of processing one item.
#[derive(Debug)]
pub struct ItemOutcome<I, T> {
    pub item: I,
    pub result: Result<T, StampError>,
}

/// Outcomes of a batch run, in the order items were attempted.
#[derive(Debug)]
pub struct BatchReport<I, T> {
    pub outcomes: Vec<ItemOutcome<I, T>>,
    /// True if an `Abort` policy stopped the run early
    pub aborted: bool,
}

impl<I, T> BatchReport<I, T> {
    pub fn successes(&self) -> impl Iterator<Item = (&I, &T)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|value| (&o.item, value)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&I, &StampError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|err| (&o.item, err)))
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Collapse into the successful values, or the first error.
    pub fn into_result(self) -> Result<Vec<T>, StampError> {
        self.outcomes.into_iter().map(|o| o.result).collect()
    }
}

/// Run `process` over `items` sequentially under the given policy.
pub fn run_batch<I, T, F>(
    items: impl IntoIterator<Item = I>,
    policy: FailurePolicy,
    mut process: F,
) -> BatchReport<I, T>
where
    F: FnMut(&I) -> Result<T, StampError>,
{
    let mut outcomes = Vec::new();
    let mut aborted = false;

    for item in items {
        let result = process(&item);
        let failed = result.is_err();
        outcomes.push(ItemOutcome { item, result });

        if failed && policy == FailurePolicy::Abort {
            aborted = true;
            break;
        }
    }

    BatchReport { outcomes, aborted }
}
