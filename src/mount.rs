//! Short-lived UI mounts: a menu, dialog or picker that lives until it
//! reports a result.
//!
//! [`mount_temporary`] creates a container through a [`MountHost`], mounts a
//! component into it and hands the component a [`DoneHandle`]. The first call
//! to [`DoneHandle::done`] resolves the [`Completion`] and tears the mount
//! down, either right away or after the configured delay.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, warn};

/// The environment components are mounted into.
pub trait MountHost: Send + Sync + 'static {
    type Component;
    type Props;
    type Container: Send + 'static;
    /// Handle to a mounted component, shared with the caller.
    type Instance: Clone + Send + 'static;
    type Error: fmt::Display;

    fn create_container(&self) -> Result<Self::Container, Self::Error>;

    fn mount<T: Send + 'static>(
        &self,
        container: &Self::Container,
        component: Self::Component,
        props: Self::Props,
        done: DoneHandle<T>,
    ) -> Result<Self::Instance, Self::Error>;

    fn unmount(&self, instance: Self::Instance) -> Result<(), Self::Error>;

    fn remove_container(&self, container: Self::Container) -> Result<(), Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum MountError<E> {
    #[error("failed to create container: {0}")]
    Container(E),
    #[error("failed to mount component: {0}")]
    Mount(E),
}

type Teardown = Box<dyn FnOnce() + Send>;

struct Shared<T> {
    completed: AtomicBool,
    sender:    Mutex<Option<oneshot::Sender<Option<T>>>>,
    teardown:  Mutex<Option<Teardown>>,
    delay:     Option<Duration>,
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Shared<T> {
    fn schedule(&self, teardown: Teardown) {
        match self.delay.filter(|delay| !delay.is_zero()) {
            None => teardown(),
            Some(delay) => {
                if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                    runtime.spawn(async move {
                        tokio::time::sleep(delay).await;
                        teardown();
                    });
                } else {
                    std::thread::spawn(move || {
                        std::thread::sleep(delay);
                        teardown();
                    });
                }
            }
        }
    }

    /// Stores the teardown, or runs it if `done` already happened.
    fn arm(&self, teardown: Teardown) {
        let mut slot = lock(&self.teardown);
        if self.completed.load(Ordering::Acquire) {
            drop(slot);
            self.schedule(teardown);
        } else {
            *slot = Some(teardown);
        }
    }
}

/// Completes a temporary mount. Clones share one completion; only the first
/// `done` or `cancel` counts.
pub struct DoneHandle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for DoneHandle<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for DoneHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoneHandle")
            .field("completed", &self.is_done())
            .field("delay", &self.shared.delay)
            .finish_non_exhaustive()
    }
}

impl<T> DoneHandle<T> {
    fn new(sender: oneshot::Sender<Option<T>>, delay: Option<Duration>) -> Self {
        Self {
            shared: Arc::new(Shared {
                completed: AtomicBool::new(false),
                sender: Mutex::new(Some(sender)),
                teardown: Mutex::new(None),
                delay,
            }),
        }
    }

    /// Resolves the completion with `value` and tears the mount down.
    /// Calls after the first are ignored.
    pub fn done(&self, value: Option<T>) {
        if self.shared.completed.swap(true, Ordering::AcqRel) {
            return;
        }

        let teardown = lock(&self.shared.teardown).take();
        if let Some(teardown) = teardown {
            self.shared.schedule(teardown);
        }

        if let Some(sender) = lock(&self.shared.sender).take() {
            // The receiver may already be gone; nobody is waiting then
            let _ = sender.send(value);
        }
    }

    /// Same as `done(None)`.
    pub fn cancel(&self) {
        self.done(None);
    }

    pub fn is_done(&self) -> bool {
        self.shared.completed.load(Ordering::Acquire)
    }
}

/// Resolves to the value passed to `done`, or `None` after `cancel` or once
/// every [`DoneHandle`] is dropped without completing.
#[derive(Debug)]
pub struct Completion<T> {
    receiver: oneshot::Receiver<Option<T>>,
}

impl<T> Future for Completion<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.ok().flatten())
    }
}

/// A live temporary mount.
pub struct MountedApp<H: MountHost, T> {
    pub instance:   H::Instance,
    pub done:       DoneHandle<T>,
    pub completion: Completion<T>,
}

impl<H: MountHost, T> MountedApp<H, T> {
    pub fn done(&self, value: Option<T>) {
        self.done.done(value);
    }

    pub fn cancel(&self) {
        self.done.cancel();
    }
}

/// Mounts `component` into a fresh container and returns once it is live.
///
/// With a non-zero `delay`, teardown happens that long after `done` while the
/// completion still resolves immediately.
///
/// # Errors
/// Returns `MountError::Container` if no container could be created and
/// `MountError::Mount` if mounting failed; the container is removed first.
pub fn mount_temporary<H, T>(
    host: Arc<H>,
    component: H::Component,
    props: H::Props,
    delay: Option<Duration>,
) -> Result<MountedApp<H, T>, MountError<H::Error>>
where
    H: MountHost,
    T: Send + 'static,
{
    let (sender, receiver) = oneshot::channel();
    let done = DoneHandle::new(sender, delay);

    let container = host.create_container().map_err(MountError::Container)?;

    let instance = match host.mount(&container, component, props, done.clone()) {
        Ok(instance) => instance,
        Err(err) => {
            warn!(error = %err, "failed to mount component");
            remove_container(host.as_ref(), container);
            return Err(MountError::Mount(err));
        }
    };
    debug!("component mounted");

    let teardown_host = Arc::clone(&host);
    let teardown_instance = instance.clone();
    done.shared.arm(Box::new(move || {
        if let Err(err) = teardown_host.unmount(teardown_instance) {
            warn!(error = %err, "failed to unmount component");
        }
        remove_container(teardown_host.as_ref(), container);
        debug!("component unmounted and cleaned up");
    }));

    Ok(MountedApp {
        instance,
        done,
        completion: Completion { receiver },
    })
}

fn remove_container<H: MountHost>(host: &H, container: H::Container) {
    if let Err(err) = host.remove_container(container) {
        warn!(error = %err, "failed to remove container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every host call; optionally fails or completes during mount.
    #[derive(Default)]
    struct FakeHost {
        events:            Mutex<Vec<String>>,
        fail_container:    bool,
        fail_mount:        bool,
        complete_on_mount: bool,
    }

    impl FakeHost {
        fn events(&self) -> Vec<String> {
            lock(&self.events).clone()
        }

        fn record(&self, event: impl Into<String>) {
            lock(&self.events).push(event.into());
        }
    }

    impl MountHost for FakeHost {
        type Component = &'static str;
        type Props = u32;
        type Container = u32;
        type Instance = &'static str;
        type Error = String;

        fn create_container(&self) -> Result<u32, String> {
            if self.fail_container {
                return Err("no document".to_owned());
            }
            self.record("create");
            Ok(7)
        }

        fn mount<T: Send + 'static>(
            &self,
            container: &u32,
            component: &'static str,
            props: u32,
            done: DoneHandle<T>,
        ) -> Result<&'static str, String> {
            if self.fail_mount {
                return Err(format!("{component} exploded"));
            }
            self.record(format!("mount {component} into {container} with {props}"));
            if self.complete_on_mount {
                done.cancel();
            }
            Ok(component)
        }

        fn unmount(&self, instance: &'static str) -> Result<(), String> {
            self.record(format!("unmount {instance}"));
            Ok(())
        }

        fn remove_container(&self, container: u32) -> Result<(), String> {
            self.record(format!("remove {container}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_done_resolves_and_tears_down() {
        let host = Arc::new(FakeHost::default());
        let app = mount_temporary::<_, u32>(Arc::clone(&host), "menu", 3, None).unwrap();
        assert_eq!(app.instance, "menu");
        assert!(!app.done.is_done());

        app.done(Some(42));
        app.done(Some(99));
        assert!(app.done.is_done());

        assert_eq!(
            host.events(),
            ["create", "mount menu into 7 with 3", "unmount menu", "remove 7"]
        );
        assert_eq!(app.completion.await, Some(42));
    }

    #[tokio::test]
    async fn test_cancel_resolves_none() {
        let host = Arc::new(FakeHost::default());
        let app = mount_temporary::<_, u32>(Arc::clone(&host), "dialog", 0, None).unwrap();

        let handle = app.done.clone();
        handle.cancel();
        app.done(Some(1));

        assert_eq!(app.completion.await, None);
        assert_eq!(host.events().len(), 4);
    }

    #[tokio::test]
    async fn test_teardown_runs_once_across_clones() {
        let host = Arc::new(FakeHost::default());
        let app = mount_temporary::<_, ()>(Arc::clone(&host), "picker", 0, None).unwrap();

        let handles: Vec<_> = (0..4).map(|_| app.done.clone()).collect();
        for handle in &handles {
            handle.done(Some(()));
        }

        let unmounts = host
            .events()
            .iter()
            .filter(|event| event.starts_with("unmount"))
            .count();
        assert_eq!(unmounts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_teardown() {
        let host = Arc::new(FakeHost::default());
        let delay = Duration::from_millis(300);
        let app = mount_temporary::<_, &str>(Arc::clone(&host), "toast", 1, Some(delay)).unwrap();

        app.done(Some("ok"));
        let MountedApp { completion, .. } = app;
        assert_eq!(completion.await, Some("ok"));
        assert_eq!(host.events().len(), 2, "teardown must wait for the delay");

        tokio::time::sleep(delay * 2).await;
        assert_eq!(
            host.events(),
            ["create", "mount toast into 7 with 1", "unmount toast", "remove 7"]
        );
    }

    #[tokio::test]
    async fn test_zero_delay_tears_down_immediately() {
        let host = Arc::new(FakeHost::default());
        let app = mount_temporary::<_, u8>(Arc::clone(&host), "menu", 0, Some(Duration::ZERO)).unwrap();
        app.cancel();
        assert_eq!(host.events().len(), 4);
    }

    #[tokio::test]
    async fn test_done_during_mount_still_tears_down() {
        let host = Arc::new(FakeHost {
            complete_on_mount: true,
            ..FakeHost::default()
        });
        let app = mount_temporary::<_, u8>(Arc::clone(&host), "menu", 0, None).unwrap();

        assert!(app.done.is_done());
        assert_eq!(
            host.events(),
            ["create", "mount menu into 7 with 0", "unmount menu", "remove 7"]
        );
        assert_eq!(app.completion.await, None);
    }

    #[test]
    fn test_mount_failure_removes_container() {
        let host = Arc::new(FakeHost {
            fail_mount: true,
            ..FakeHost::default()
        });
        let result = mount_temporary::<_, u8>(Arc::clone(&host), "menu", 0, None);

        assert!(matches!(result, Err(MountError::Mount(ref msg)) if msg == "menu exploded"));
        assert_eq!(host.events(), ["create", "remove 7"]);
    }

    #[test]
    fn test_container_failure_is_reported() {
        let host = Arc::new(FakeHost {
            fail_container: true,
            ..FakeHost::default()
        });
        let result = mount_temporary::<_, u8>(Arc::clone(&host), "menu", 0, None);

        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "failed to create container: no document");
        assert!(host.events().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_handles_resolve_none() {
        let host = Arc::new(FakeHost::default());
        let app = mount_temporary::<_, u8>(Arc::clone(&host), "menu", 0, None).unwrap();

        let MountedApp { done, completion, .. } = app;
        drop(done);
        assert_eq!(completion.await, None);
    }
}
