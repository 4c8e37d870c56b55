use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, RwLock};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::{RequestClass, Scheduler};
use crate::error::SubmitError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

/// Command applied to the scheduler by the owner loop.
#[derive(Debug, Clone, Copy)]
enum Command {
    Submit { class: RequestClass, priority: i64 },
    Complete { class: RequestClass },
}

/// Handle for driving the gate.
///
/// Cheap to clone; every clone feeds the same bounded command channel, so
/// all callers funnel into the single owner loop.
#[derive(Clone)]
pub struct GateHandle {
    tx: mpsc::Sender<Command>,
}

impl GateHandle {
    /// Submits a request (async, waits if the queue is full).
    pub async fn submit(&self, class: RequestClass, priority: i64) -> Result<(), SubmitError> {
        self.tx
            .send(Command::Submit { class, priority })
            .await
            .map_err(|_| SubmitError::Closed)
    }

    /// Tries to submit without blocking (fails if the queue is full).
    pub fn try_submit(&self, class: RequestClass, priority: i64) -> Result<(), SubmitError> {
        self.tx
            .try_send(Command::Submit { class, priority })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => SubmitError::Full,
                mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
            })
    }

    /// Signals completion of one active request of `class`.
    ///
    /// Contract: every `complete` must match a prior admission of that
    /// class. A violation is a programming error; the owner loop fails
    /// loudly on it rather than corrupting the exclusivity invariant.
    pub async fn complete(&self, class: RequestClass) -> Result<(), SubmitError> {
        self.tx
            .send(Command::Complete { class })
            .await
            .map_err(|_| SubmitError::Closed)
    }

    /// Tries to signal completion without blocking.
    pub fn try_complete(&self, class: RequestClass) -> Result<(), SubmitError> {
        self.tx
            .try_send(Command::Complete { class })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => SubmitError::Full,
                mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
            })
    }
}

/// Owner task around the [`Scheduler`].
///
/// The admission decision reads all three queue maxima and then mutates
/// shared counters; interleaving two decisions would break the exclusivity
/// invariant. The gate therefore serializes every `submit`/`complete`
/// through one bounded channel drained by a single loop, and publishes the
/// resulting transitions on the event [`Bus`].
pub struct Gate {
    config: Config,
    bus: Bus,
    subscribers: Vec<Arc<dyn Subscribe>>,

    // Written only by the owner loop; readable for introspection.
    state: RwLock<Scheduler>,

    // Submission queue.
    tx: mpsc::Sender<Command>,
    rx: RwLock<Option<mpsc::Receiver<Command>>>,
}

impl Gate {
    /// Creates a new gate (must call [`Gate::run`] to start).
    pub fn new(config: Config) -> Arc<Self> {
        Self::with_subscribers(config, Vec::new())
    }

    /// Creates a new gate with event subscribers attached.
    ///
    /// Each subscriber gets its own listener task and bus receiver once
    /// [`Gate::run`] is called.
    pub fn with_subscribers(config: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Arc<Self> {
        let (tx, rx) = mpsc::channel(config.queue_capacity_clamped());
        let bus = Bus::new(config.bus_capacity_clamped());

        Arc::new(Self {
            state: RwLock::new(Scheduler::from_config(&config)),
            config,
            bus,
            subscribers,
            tx,
            rx: RwLock::new(Some(rx)),
        })
    }

    /// Returns a handle for driving the gate.
    pub fn handle(&self) -> GateHandle {
        GateHandle {
            tx: self.tx.clone(),
        }
    }

    /// Creates a new receiver observing subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Returns the configuration the gate was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Starts the owner loop and subscriber listeners (spawns in
    /// background).
    pub fn run(self: Arc<Self>, token: CancellationToken) {
        for sub in self.subscribers.iter().cloned() {
            let rx = self.bus.subscribe();
            tokio::spawn(Self::listener_loop(sub, rx, token.clone()));
        }

        tokio::spawn(async move {
            if let Err(e) = self.run_inner(token).await {
                eprintln!("[gate] error: {e:?}");
            }
        });
    }

    async fn run_inner(&self, token: CancellationToken) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .write()
            .await
            .take()
            .ok_or_else(|| anyhow::anyhow!("gate already running"))?;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,

                cmd = rx.recv() => match cmd {
                    Some(cmd) => self.apply(cmd).await,
                    None => break,
                }
            }
        }

        self.bus.publish(Event::new(EventKind::GateStopped));
        Ok(())
    }

    /// Applies one command to the scheduler and publishes the transitions.
    async fn apply(&self, cmd: Command) {
        match cmd {
            Command::Submit { class, priority } => {
                let grants = self.state.write().await.submit(class, priority);
                if grants.is_empty() {
                    self.bus.publish(Event::queued(class, priority));
                }
                for grant in &grants {
                    self.bus.publish(Event::admitted(grant));
                }
            }
            Command::Complete { class } => {
                let grants = self.state.write().await.complete(class);
                self.bus.publish(Event::released(class));
                for grant in &grants {
                    self.bus.publish(Event::admitted(grant));
                }
            }
        }
    }

    /// `true` iff `class` currently passes the eligibility predicate.
    pub async fn is_eligible(&self, class: RequestClass) -> bool {
        self.state.read().await.is_eligible(class)
    }

    /// Highest pending priority of `class`, if any.
    pub async fn peek_max(&self, class: RequestClass) -> Option<i64> {
        self.state.read().await.peek_max(class)
    }

    /// Number of `class` requests currently holding a slot.
    pub async fn active(&self, class: RequestClass) -> usize {
        self.state.read().await.active(class)
    }

    /// Number of `class` requests still waiting.
    pub async fn pending(&self, class: RequestClass) -> usize {
        self.state.read().await.pending(class)
    }

    /// Slots currently unoccupied.
    pub async fn free_slots(&self) -> usize {
        self.state.read().await.free_slots()
    }

    /// Feeds one subscriber from its own bus receiver until cancellation.
    async fn listener_loop(
        sub: Arc<dyn Subscribe>,
        mut rx: broadcast::Receiver<Event>,
        token: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = token.cancelled() => break,

                res = rx.recv() => match res {
                    Ok(ev) => sub.on_event(&ev).await,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}
