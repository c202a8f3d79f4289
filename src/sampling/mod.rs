mod loop_worker;

pub(crate) use loop_worker::sampling_loop;
