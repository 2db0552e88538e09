use crate::event::EventDescriptor;
use crate::ffi::{bindings as b, Attr};

/// Counting attribute for one group member.
///
/// Members are opened disabled and report `{ nr, { value, id } cntr[nr] }`
/// when the leader is read.
pub(crate) fn from(desc: &EventDescriptor) -> Attr {
    let mut attr = Attr {
        size: size_of::<Attr>() as _,
        ..Default::default()
    };

    attr.type_ = desc.ty() as _;
    attr.config = desc.config();
    attr.read_format = b::PERF_FORMAT_GROUP | b::PERF_FORMAT_ID;

    macro_rules! then {
        ($bool:expr, $then:tt) => {
            if $bool {
                attr.$then(1);
            }
        };
    }
    then!(true, set_disabled);
    then!(desc.exclude_kernel(), set_exclude_kernel);
    then!(desc.exclude_hv(), set_exclude_hv);

    attr
}
