//! Windows low-level keyboard hook for the F4 escape key.
//!
//! While the icon window is focused, every key is forwarded to the device,
//! including the chords the OS would normally act on.  This hook gives the
//! user a local escape: F4 minimizes the foreground window (dropping focus
//! and thereby releasing capture) and is swallowed instead of being
//! forwarded.
//!
//! The hook runs a WH_KEYBOARD_LL callback on a dedicated Win32
//! message-loop thread.  [`KeyboardHookGuard`] owns that thread: dropping
//! the guard posts WM_QUIT, joins the thread, and unhooks, so the hook
//! never outlives the session on any exit path.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use thiserror::Error;
use tracing::{debug, warn};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::VK_F4;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetForegroundWindow, GetMessageW, PostThreadMessageW,
    SetWindowsHookExW, ShowWindow, UnhookWindowsHookEx, HC_ACTION, KBDLLHOOKSTRUCT, MSG,
    SW_MINIMIZE, WH_KEYBOARD_LL, WM_KEYDOWN, WM_QUIT,
};

/// Error type for hook installation.
#[derive(Debug, Error)]
pub enum HookError {
    /// A hook guard already exists in this process.
    #[error("keyboard hook already installed")]
    AlreadyInstalled,

    /// The hook thread or the WH_KEYBOARD_LL hook could not be created.
    #[error("could not install keyboard hook: {0}")]
    InstallFailed(String),
}

/// Callback invoked from the hook thread when F4 is swallowed.  `None`
/// while no guard is alive; hook callbacks cannot capture state, so this
/// is the one piece of process-global state the guard manages.
static MINIMIZE_NOTIFY: Mutex<Option<Box<dyn Fn() + Send>>> = Mutex::new(None);

/// Scoped owner of the WH_KEYBOARD_LL hook and its message-loop thread.
pub struct KeyboardHookGuard {
    thread_id: u32,
    handle: Option<thread::JoinHandle<()>>,
}

impl KeyboardHookGuard {
    /// Installs the hook and arms `notify`, which is invoked (from the hook
    /// thread) every time F4 is swallowed.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::AlreadyInstalled`] if a guard is already alive,
    /// or [`HookError::InstallFailed`] if the thread or hook could not be
    /// created.
    pub fn install(notify: impl Fn() + Send + 'static) -> Result<Self, HookError> {
        {
            let mut slot = MINIMIZE_NOTIFY
                .lock()
                .map_err(|e| HookError::InstallFailed(e.to_string()))?;
            if slot.is_some() {
                return Err(HookError::AlreadyInstalled);
            }
            *slot = Some(Box::new(notify));
        }

        let (tx, rx) = mpsc::channel::<Result<u32, String>>();

        let handle = thread::Builder::new()
            .name("hidbridge-hook-loop".to_string())
            .spawn(move || run_hook_message_loop(tx))
            .map_err(|e| {
                clear_notify();
                HookError::InstallFailed(e.to_string())
            })?;

        match rx.recv() {
            Ok(Ok(thread_id)) => {
                debug!(thread_id, "keyboard hook installed");
                Ok(Self {
                    thread_id,
                    handle: Some(handle),
                })
            }
            Ok(Err(reason)) => {
                clear_notify();
                let _ = handle.join();
                Err(HookError::InstallFailed(reason))
            }
            Err(e) => {
                clear_notify();
                let _ = handle.join();
                Err(HookError::InstallFailed(e.to_string()))
            }
        }
    }
}

impl Drop for KeyboardHookGuard {
    fn drop(&mut self) {
        // SAFETY: Posting WM_QUIT to the hook thread's message queue is the
        // standard way to end its GetMessageW loop.
        let posted =
            unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) };
        if let Err(e) = posted {
            warn!("could not stop keyboard hook thread: {e}");
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        clear_notify();
        debug!("keyboard hook removed");
    }
}

fn clear_notify() {
    if let Ok(mut slot) = MINIMIZE_NOTIFY.lock() {
        *slot = None;
    }
}

/// Entry point for the dedicated Win32 message loop thread.
fn run_hook_message_loop(ready: mpsc::Sender<Result<u32, String>>) {
    // SAFETY: SetWindowsHookExW requires the calling thread to have a message
    // loop; the loop below starts immediately after installation.
    let hook = match unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0) }
    {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };

    // SAFETY: Trivially safe; returns the id of the current thread.
    let _ = ready.send(Ok(unsafe { GetCurrentThreadId() }));

    // Win32 message loop – blocks until WM_QUIT is posted.
    let mut msg = MSG::default();
    // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            DispatchMessageW(&msg);
        }
        let _ = UnhookWindowsHookEx(hook);
    }
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// This function is called by Windows from the hook message loop thread.
/// It must return quickly (< ~300ms) to avoid hook removal by the OS.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code != HC_ACTION as i32 {
        // SAFETY: Must call CallNextHookEx when n_code < 0.
        return CallNextHookEx(None, n_code, w_param, l_param);
    }

    // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
    let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);

    if w_param.0 as u32 == WM_KEYDOWN && kbs.vkCode == u32::from(VK_F4.0) {
        if let Ok(slot) = MINIMIZE_NOTIFY.lock() {
            if let Some(notify) = slot.as_ref() {
                notify();
            }
        }
        let hwnd = GetForegroundWindow();
        if !hwnd.is_invalid() {
            let _ = ShowWindow(hwnd, SW_MINIMIZE);
        }
        // Swallow the key so it is neither forwarded nor seen locally.
        return LRESULT(1);
    }

    // SAFETY: Forward the event to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}
