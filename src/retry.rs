use crate::model::ScraperError;
use crate::proxy::ProxyPool;
use rand::Rng;

/// What happened during one attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    Succeeded,
    /// The results container never appeared.
    SidebarTimeout,
    Failed(ScraperError),
}

/// Why the machine stopped handing out attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Attempt { number: u32, proxy: String },
    Stop(Termination),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Running,
    Done(Termination),
}

/// Attempt -> outcome -> next proxy or stop.
///
/// Every outcome other than `Succeeded` consumes one attempt. The machine
/// never sleeps; pauses between attempts are up to the caller.
#[derive(Debug)]
pub struct RetryMachine {
    max_attempts: u32,
    attempts: u32,
    state: State,
}

impl RetryMachine {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            attempts: 0,
            state: State::Ready,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn next<R: Rng + ?Sized>(&mut self, pool: &ProxyPool, rng: &mut R) -> Step {
        match self.state {
            State::Done(termination) => Step::Stop(termination),
            State::Running => {
                // An attempt was handed out but never recorded; treat it as failed.
                self.state = State::Ready;
                self.next(pool, rng)
            }
            State::Ready if self.attempts >= self.max_attempts => {
                let termination = Termination::Exhausted {
                    attempts: self.attempts,
                };
                self.state = State::Done(termination);
                Step::Stop(termination)
            }
            State::Ready => {
                self.attempts += 1;
                self.state = State::Running;
                Step::Attempt {
                    number: self.attempts,
                    proxy: pool.pick(rng).to_string(),
                }
            }
        }
    }

    pub fn record(&mut self, outcome: AttemptOutcome) {
        if let State::Done(_) = self.state {
            return;
        }
        self.state = match outcome {
            AttemptOutcome::Succeeded => State::Done(Termination::Succeeded {
                attempts: self.attempts,
            }),
            AttemptOutcome::SidebarTimeout | AttemptOutcome::Failed(_) => State::Ready,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool() -> ProxyPool {
        ProxyPool::from_lines("socks5://one:1080\nsocks5://two:1080").unwrap()
    }

    #[test]
    fn stops_after_first_success() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(1);
        let mut machine = RetryMachine::new(3);

        assert!(matches!(machine.next(&pool, &mut rng), Step::Attempt { number: 1, .. }));
        machine.record(AttemptOutcome::Succeeded);
        assert_eq!(
            machine.next(&pool, &mut rng),
            Step::Stop(Termination::Succeeded { attempts: 1 })
        );
        // Stays stopped.
        machine.record(AttemptOutcome::SidebarTimeout);
        assert_eq!(
            machine.next(&pool, &mut rng),
            Step::Stop(Termination::Succeeded { attempts: 1 })
        );
    }

    #[test]
    fn exhausts_after_max_attempts() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(2);
        let mut machine = RetryMachine::new(3);

        for expected in 1..=3 {
            match machine.next(&pool, &mut rng) {
                Step::Attempt { number, proxy } => {
                    assert_eq!(number, expected);
                    assert!(proxy.starts_with("socks5://"));
                }
                other => panic!("unexpected step {other:?}"),
            }
            if expected == 2 {
                machine.record(AttemptOutcome::SidebarTimeout);
            } else {
                machine.record(AttemptOutcome::Failed(ScraperError::Http("refused".into())));
            }
        }

        assert_eq!(
            machine.next(&pool, &mut rng),
            Step::Stop(Termination::Exhausted { attempts: 3 })
        );
        assert_eq!(machine.attempts(), 3);
    }

    #[test]
    fn zero_attempts_stops_immediately() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(3);
        let mut machine = RetryMachine::new(0);
        assert_eq!(
            machine.next(&pool, &mut rng),
            Step::Stop(Termination::Exhausted { attempts: 0 })
        );
    }
}
