use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};
use super::{MockVRControlMsg, MockVRInit};
use crate::{HmdMatrix34, TrackedDeviceClass, TrackedDeviceIndex, TrackedDevicePose, TrackedDeviceProperty,
            VRControllerRawState, VRControllerRole, VREye, VRError, VRFrustumTangents, VRRuntime, VRTexture,
            VRTextureBounds, MAX_TRACKED_DEVICE_COUNT, TRACKED_DEVICE_INDEX_HMD};

// A submitted eye texture, as the compositor saw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockSubmission {
    pub frame: u64,
    pub eye: VREye,
    pub texture: VRTexture,
    pub bounds: VRTextureBounds,
}

/// Simulated runtime state, shared with tests through `state_handle`.
pub struct MockVRState {
    pub init: MockVRInit,
    pub initialized: bool,
    pub device_poses: Vec<TrackedDevicePose>,
    pub device_classes: Vec<TrackedDeviceClass>,
    // None makes the controller state query fail for that slot.
    pub controller_states: Vec<Option<VRControllerRawState>>,
    pub left_hand: Option<TrackedDeviceIndex>,
    pub right_hand: Option<TrackedDeviceIndex>,
    pub submit_error: Option<String>,
    pub submissions: Vec<MockSubmission>,
    pub frame_count: u64,
    pub eye_to_head_queries: u32,
    pub shutdown_count: u32,
}

impl MockVRState {
    fn new(init: MockVRInit) -> MockVRState {
        let count = MAX_TRACKED_DEVICE_COUNT as usize;
        let mut state = MockVRState {
            init: init,
            initialized: false,
            device_poses: vec![TrackedDevicePose::default(); count],
            device_classes: vec![TrackedDeviceClass::Invalid; count],
            controller_states: vec![None; count],
            left_hand: None,
            right_hand: None,
            submit_error: None,
            submissions: Vec::new(),
            frame_count: 0,
            eye_to_head_queries: 0,
            shutdown_count: 0,
        };
        // Simulates a standing user, eyes 1.6m above the floor.
        state.connect_device(TRACKED_DEVICE_INDEX_HMD,
                             TrackedDeviceClass::HMD,
                             HmdMatrix34::from_translation(0.0, 1.6, 0.0));
        state
    }

    pub fn connect_device(&mut self,
                          index: TrackedDeviceIndex,
                          class: TrackedDeviceClass,
                          pose: HmdMatrix34) {
        let slot = index as usize;
        if slot >= self.device_poses.len() {
            warn!("Ignoring device {} beyond the last tracked slot", index);
            return;
        }
        self.device_classes[slot] = class;
        self.device_poses[slot] = TrackedDevicePose {
            device_to_absolute_tracking: pose,
            pose_is_valid: true,
            device_is_connected: true,
            ..Default::default()
        };
        if class == TrackedDeviceClass::Controller && self.controller_states[slot].is_none() {
            self.controller_states[slot] = Some(VRControllerRawState::default());
        }
    }

    pub fn handle_msg(&mut self, msg: MockVRControlMsg) {
        match msg {
            MockVRControlMsg::ConnectDevice(index, class, pose) => {
                self.connect_device(index, class, pose);
            }
            MockVRControlMsg::SetDevicePose(index, pose) => {
                match self.device_poses.get_mut(index as usize) {
                    Some(slot) => *slot = pose,
                    None => warn!("Ignoring pose for unknown device {}", index),
                }
            }
            MockVRControlMsg::DisconnectDevice(index) => {
                match self.device_poses.get_mut(index as usize) {
                    Some(slot) => *slot = TrackedDevicePose::default(),
                    None => warn!("Ignoring disconnect of unknown device {}", index),
                }
            }
            MockVRControlMsg::SetControllerState(index, state) => {
                match self.controller_states.get_mut(index as usize) {
                    Some(slot) => *slot = state,
                    None => warn!("Ignoring controller state for unknown device {}", index),
                }
            }
            MockVRControlMsg::SetControllerRole(role, index) => {
                match role {
                    VRControllerRole::LeftHand => self.left_hand = index,
                    VRControllerRole::RightHand => self.right_hand = index,
                    VRControllerRole::Undefined => {}
                }
            }
            MockVRControlMsg::SetFrustum(eye, tangents) => {
                match eye {
                    VREye::Left => self.init.left_frustum = tangents,
                    VREye::Right => self.init.right_frustum = tangents,
                }
            }
            MockVRControlMsg::SetSubmitError(error) => {
                self.submit_error = error;
            }
        }
    }
}

pub struct MockVRRuntime {
    state: Arc<Mutex<MockVRState>>,
    receiver: Option<Receiver<MockVRControlMsg>>,
}

impl MockVRRuntime {
    pub fn new(init: MockVRInit) -> MockVRRuntime {
        MockVRRuntime {
            state: Arc::new(Mutex::new(MockVRState::new(init))),
            receiver: None,
        }
    }

    pub fn new_with_receiver(receiver: Receiver<MockVRControlMsg>, init: MockVRInit) -> MockVRRuntime {
        MockVRRuntime {
            state: Arc::new(Mutex::new(MockVRState::new(init))),
            receiver: Some(receiver),
        }
    }

    pub fn state_handle(&self) -> Arc<Mutex<MockVRState>> {
        self.state.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockVRState> {
        // A poisoned lock only means a test panicked while holding it.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    // Control messages land between frames, like device events would.
    fn drain_messages(&mut self) {
        let messages: Vec<MockVRControlMsg> = match self.receiver {
            Some(ref receiver) => receiver.try_iter().collect(),
            None => return,
        };
        let mut state = self.state();
        for msg in messages {
            state.handle_msg(msg);
        }
    }
}

impl VRRuntime for MockVRRuntime {
    fn initialize(&mut self) -> Result<(), VRError> {
        let mut state = self.state();
        if let Some(ref reason) = state.init.init_error {
            return Err(VRError::RuntimeInit(reason.clone()));
        }
        state.initialized = true;
        Ok(())
    }

    fn is_hmd_present(&self) -> bool {
        self.state().init.hmd_present
    }

    fn has_compositor(&self) -> bool {
        self.state().init.has_compositor
    }

    fn recommended_render_target_size(&self) -> (u32, u32) {
        self.state().init.render_size
    }

    fn projection_raw(&self, eye: VREye) -> VRFrustumTangents {
        let state = self.state();
        match eye {
            VREye::Left => state.init.left_frustum,
            VREye::Right => state.init.right_frustum,
        }
    }

    fn eye_to_head_transform(&self, eye: VREye) -> HmdMatrix34 {
        let mut state = self.state();
        state.eye_to_head_queries += 1;
        match eye {
            VREye::Left => state.init.left_eye_to_head,
            VREye::Right => state.init.right_eye_to_head,
        }
    }

    fn wait_get_poses(&mut self, poses: &mut [TrackedDevicePose]) -> Result<(), VRError> {
        self.drain_messages();
        let mut state = self.state();
        if !state.initialized {
            return Err(VRError::PoseWait("runtime not initialized".into()));
        }
        state.frame_count += 1;
        for (out, pose) in poses.iter_mut().zip(state.device_poses.iter()) {
            *out = *pose;
        }
        Ok(())
    }

    fn tracked_device_class(&self, index: TrackedDeviceIndex) -> TrackedDeviceClass {
        self.state().device_classes.get(index as usize).cloned().unwrap_or(TrackedDeviceClass::Invalid)
    }

    fn string_property(&self,
                       index: TrackedDeviceIndex,
                       property: TrackedDeviceProperty)
                       -> Result<String, VRError> {
        let state = self.state();
        match (index, property, state.init.device_name.as_ref()) {
            (TRACKED_DEVICE_INDEX_HMD, TrackedDeviceProperty::TrackingSystemName, Some(name)) => Ok(name.clone()),
            _ => Err(VRError::PropertyQuery(format!("{:?} unavailable for device {}", property, index))),
        }
    }

    fn controller_role_index(&self, role: VRControllerRole) -> Option<TrackedDeviceIndex> {
        let state = self.state();
        match role {
            VRControllerRole::LeftHand => state.left_hand,
            VRControllerRole::RightHand => state.right_hand,
            VRControllerRole::Undefined => None,
        }
    }

    fn controller_state(&self, index: TrackedDeviceIndex) -> Result<VRControllerRawState, VRError> {
        match self.state().controller_states.get(index as usize) {
            Some(&Some(raw)) => Ok(raw),
            _ => Err(VRError::ControllerState {
                index: index,
                reason: "controller state struct size mismatch".into(),
            }),
        }
    }

    fn submit(&mut self,
              eye: VREye,
              texture: &VRTexture,
              bounds: &VRTextureBounds)
              -> Result<(), VRError> {
        let mut state = self.state();
        if let Some(ref reason) = state.submit_error {
            return Err(VRError::CompositorSubmit { eye: eye, reason: reason.clone() });
        }
        let frame = state.frame_count;
        state.submissions.push(MockSubmission {
            frame: frame,
            eye: eye,
            texture: *texture,
            bounds: *bounds,
        });
        Ok(())
    }

    fn shutdown(&mut self) {
        let mut state = self.state();
        state.initialized = false;
        state.shutdown_count += 1;
    }
}
