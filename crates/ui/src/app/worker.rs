use std::{
    sync::{
        mpsc::{channel, Receiver, SendError, Sender},
        Arc,
    },
    thread,
    time::Duration,
};

use leitor_core::{
    error::SpeechError,
    popup::{LookupReply, LookupRequest},
    source::ResourceSource,
    speech::{SpeechPort, Voice},
    viewer::{PageReply, PageRequest},
};
use tracing::warn;

/// Background work the reader hands off so input stays responsive.
pub enum Job {
    Page(PageRequest),
    Lookup(LookupRequest),
    /// Enumerates voices with its own port instance; the catalog can take a
    /// while on some engines.
    Voices(Box<dyn SpeechPort>),
}

pub enum Reply {
    Page(PageReply),
    Lookup(LookupReply),
    Voices(Result<Vec<Voice>, SpeechError>),
}

impl Job {
    pub fn run(self, source: &dyn ResourceSource) -> Reply {
        match self {
            Job::Page(request) => Reply::Page(request.fetch(source)),
            Job::Lookup(request) => Reply::Lookup(LookupReply {
                token: request.token,
                outcome: leitor_core::lookup(source, &request.word),
            }),
            Job::Voices(catalog) => Reply::Voices(catalog.list_voices()),
        }
    }
}

/// One thread per job, replies funneled through a single channel.
pub struct Worker {
    source: Arc<dyn ResourceSource>,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
}

impl Worker {
    pub fn new(source: Arc<dyn ResourceSource>) -> Self {
        let (tx, rx) = channel();
        Self { source, tx, rx }
    }

    pub fn submit(&self, job: Job) {
        let (hand_tx, hand_rx) = channel::<Job>();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("leitor-worker".into())
            .spawn(move || {
                if let Ok(job) = hand_rx.recv() {
                    let _ = tx.send(job.run(source.as_ref()));
                }
            });
        if let Err(err) = &spawned {
            warn!(error = %err, "could not start worker thread; running job inline");
        }
        // a thread that never started dropped its receiver, so the job comes back
        if let Err(SendError(job)) = hand_tx.send(job) {
            self.answer_inline(job);
        }
    }

    fn answer_inline(&self, job: Job) {
        let _ = self.tx.send(job.run(self.source.as_ref()));
    }

    pub fn try_recv(&self) -> Option<Reply> {
        self.rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Reply> {
        self.rx.recv_timeout(timeout).ok()
    }
}
