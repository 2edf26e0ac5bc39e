use padbind_gamepad::RawInput;
use padbind_mapping::{InputMapping, LogicalInput, PhysicalBinding};
use smallvec::{smallvec, SmallVec};

/// Bindings written by one commit: the target, then the auto-bound opposite.
pub type Bound = SmallVec<[(LogicalInput, PhysicalBinding); 2]>;

/// Writes a captured input into `port` of `mapping` as the binding of `input`.
///
/// Any previous button or axis binding of `input` is dropped first. An axis
/// half also binds the other half to the opposite direction, unless that half
/// is already taken or the opposite direction has a binding of its own.
pub fn commit_capture(
    mapping: &mut InputMapping,
    port: u8,
    input: LogicalInput,
    raw: RawInput,
) -> Bound {
    mapping.clear_button(port, input);
    mapping.clear_axis(port, input);

    let bound = match raw {
        RawInput::Button(code) => {
            mapping.set_button(port, input, code);
            smallvec![(input, PhysicalBinding::Button(code))]
        }
        RawInput::Axis { code, positive } => {
            mapping.set_axis(port, input, code, positive);
            let mut bound: Bound = smallvec![(input, PhysicalBinding::Axis { code, positive })];
            if let Some(opposite) = input.opposite() {
                let free = mapping.axis_id(port, code, !positive).is_none()
                    && mapping.axis_code(port, opposite).is_none()
                    && mapping.button_code(port, opposite).is_none();
                if free {
                    mapping.set_axis(port, opposite, code, !positive);
                    bound.push((opposite, PhysicalBinding::Axis { code, positive: !positive }));
                }
            }
            bound
        }
    };

    mapping.set_dirty();
    bound
}
