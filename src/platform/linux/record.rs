//! X11 callback capture using the RECORD extension.

use super::imp::NativeStop;
use crate::error::{Error, Result};
use crate::hook::HookCore;
use crate::keymap::{self, Platform};
use std::cell::RefCell;
use std::os::raw::{c_char, c_int, c_uchar, c_ulong};
use std::ptr::null;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use x11::xlib;
use x11::xrecord;

const FALSE: c_int = 0;

thread_local! {
    /// The hook core owned by this capture thread; read by the record
    /// callback, which XRecordEnableContext invokes on this same thread.
    static ACTIVE_CORE: RefCell<Option<Arc<HookCore>>> = RefCell::new(None);
}

/// XRecord data structure for events
#[repr(C)]
struct XRecordDatum {
    type_: u8,
    code: u8,
    _rest: u64,
    _1: bool,
    _2: bool,
    _3: bool,
    root_x: i16,
    root_y: i16,
    _event_x: i16,
    _event_y: i16,
    _state: u16,
}

/// Whether the X server is reachable and advertises the RECORD extension.
pub(super) fn extension_available() -> bool {
    unsafe {
        let display = xlib::XOpenDisplay(null());
        if display.is_null() {
            return false;
        }
        let extension = xlib::XInitExtension(display, c"RECORD".as_ptr());
        xlib::XCloseDisplay(display);
        !extension.is_null()
    }
}

fn dispatch(core: &HookCore, type_: c_int, code: u8) {
    match type_ {
        t if t == xlib::KeyPress => {
            core.emit_key(keymap::from_platform_code(code as u32, Platform::Linux), true);
        }
        t if t == xlib::KeyRelease => {
            core.emit_key(
                keymap::from_platform_code(code as u32, Platform::Linux),
                false,
            );
        }
        t if t == xlib::ButtonPress => {
            if let Some(button) = keymap::button_from_platform_code(code as u32, Platform::Linux) {
                core.emit_button(button, true);
            }
        }
        t if t == xlib::ButtonRelease => {
            if let Some(button) = keymap::button_from_platform_code(code as u32, Platform::Linux) {
                core.emit_button(button, false);
            }
        }
        _ => {}
    }
}

/// XRecord callback
unsafe extern "C" fn record_callback(
    _null: *mut c_char,
    raw_data: *mut xrecord::XRecordInterceptData,
) {
    unsafe {
        let data = match raw_data.as_ref() {
            Some(d) => d,
            None => return,
        };

        if data.category != xrecord::XRecordFromServer {
            xrecord::XRecordFreeData(raw_data);
            return;
        }

        #[allow(clippy::cast_ptr_alignment)]
        let xdatum = match (data.data as *const XRecordDatum).as_ref() {
            Some(d) => d,
            None => {
                xrecord::XRecordFreeData(raw_data);
                return;
            }
        };

        ACTIVE_CORE.with(|cell| {
            if let Some(core) = cell.borrow().as_ref() {
                if core.is_running() {
                    dispatch(core, xdatum.type_ as c_int, xdatum.code);
                }
            }
        });

        xrecord::XRecordFreeData(raw_data);
    }
}

fn fail(ready: &Sender<Result<()>>, error: Error) {
    ACTIVE_CORE.with(|cell| *cell.borrow_mut() = None);
    let _ = ready.send(Err(error));
}

/// Run the record loop. Blocks on this thread until the context is disabled.
pub(super) fn run(core: Arc<HookCore>, ready: Sender<Result<()>>) {
    ACTIVE_CORE.with(|cell| *cell.borrow_mut() = Some(core.clone()));

    unsafe {
        let display = xlib::XOpenDisplay(null());
        if display.is_null() {
            fail(
                &ready,
                Error::CaptureInit("cannot open X display; ensure DISPLAY is set".into()),
            );
            return;
        }

        let extension = xlib::XInitExtension(display, c"RECORD".as_ptr());
        if extension.is_null() {
            xlib::XCloseDisplay(display);
            fail(
                &ready,
                Error::CaptureInit("XRecord extension not available".into()),
            );
            return;
        }

        // Record key and button transitions only.
        let mut record_range: xrecord::XRecordRange = *xrecord::XRecordAllocRange();
        record_range.device_events.first = xlib::KeyPress as c_uchar;
        record_range.device_events.last = xlib::ButtonRelease as c_uchar;

        let mut record_all_clients: c_ulong = xrecord::XRecordAllClients;
        let context = xrecord::XRecordCreateContext(
            display,
            0,
            &mut record_all_clients,
            1,
            &mut &mut record_range as *mut &mut xrecord::XRecordRange
                as *mut *mut xrecord::XRecordRange,
            1,
        );

        if context == 0 {
            xlib::XCloseDisplay(display);
            fail(
                &ready,
                Error::CaptureInit("failed to create XRecord context".into()),
            );
            return;
        }

        xlib::XSync(display, FALSE);

        core.set_native(NativeStop::Record { context });
        let _ = ready.send(Ok(()));

        // Blocks until the context is disabled from the control connection.
        let result =
            xrecord::XRecordEnableContext(display, context, Some(record_callback), &mut 0);
        if result == 0 {
            log::warn!("XRecordEnableContext returned failure");
        }

        xrecord::XRecordDisableContext(display, context);
        xrecord::XRecordFreeContext(display, context);
        xlib::XCloseDisplay(display);
    }

    ACTIVE_CORE.with(|cell| *cell.borrow_mut() = None);
    log::debug!("record capture loop exited");
}

/// Unblock `XRecordEnableContext` on the capture thread.
///
/// Disabling must happen over a separate control connection; the data
/// connection is parked inside the enable call.
pub(super) fn disable(context: xrecord::XRecordContext) -> Result<()> {
    unsafe {
        let display = xlib::XOpenDisplay(null());
        if display.is_null() {
            return Err(Error::Thread(
                "cannot open X display to disable record context".into(),
            ));
        }
        xrecord::XRecordDisableContext(display, context);
        xlib::XCloseDisplay(display);
    }
    Ok(())
}
