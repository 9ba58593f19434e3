use bitflags::bitflags;

/// Registered or running task state (`TASK_STATE`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Unknown = 0,
    Disabled = 1,
    Queued = 2,
    Ready = 3,
    Running = 4,
}

impl TaskState {
    pub fn from_raw(value: i32) -> Self {
        match value {
            1 => Self::Disabled,
            2 => Self::Queued,
            3 => Self::Ready,
            4 => Self::Running,
            _ => Self::Unknown,
        }
    }
}

/// Trigger kind (`TASK_TRIGGER_TYPE2`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerType {
    Event = 0,
    Time = 1,
    Daily = 2,
    Weekly = 3,
    Monthly = 4,
    MonthlyDow = 5,
    Idle = 6,
    Registration = 7,
    Boot = 8,
    Logon = 9,
    SessionStateChange = 11,
    CustomTrigger01 = 12,
}

impl TriggerType {
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::Event,
            1 => Self::Time,
            2 => Self::Daily,
            3 => Self::Weekly,
            4 => Self::Monthly,
            5 => Self::MonthlyDow,
            6 => Self::Idle,
            7 => Self::Registration,
            8 => Self::Boot,
            9 => Self::Logon,
            11 => Self::SessionStateChange,
            12 => Self::CustomTrigger01,
            _ => return None,
        })
    }
}

/// Action kind (`TASK_ACTION_TYPE`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Exec = 0,
    ComHandler = 5,
    SendEmail = 6,
    ShowMessage = 7,
}

impl ActionType {
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::Exec,
            5 => Self::ComHandler,
            6 => Self::SendEmail,
            7 => Self::ShowMessage,
            _ => return None,
        })
    }
}

bitflags! {
    /// `RegisterTaskDefinition` creation flags (`TASK_CREATION`).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TaskCreation: u32 {
        const VALIDATE_ONLY = 0x1;
        const CREATE = 0x2;
        const UPDATE = 0x4;
        const CREATE_OR_UPDATE = 0x6;
        const DISABLE = 0x8;
        const DONT_ADD_PRINCIPAL_ACE = 0x10;
        const IGNORE_REGISTRATION_TRIGGERS = 0x20;
    }
}

/// Logon type for registration (`TASK_LOGON_TYPE`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskLogonType {
    None = 0,
    Password = 1,
    S4U = 2,
    InteractiveToken = 3,
    Group = 4,
    ServiceAccount = 5,
    InteractiveTokenOrPassword = 6,
}

/// Policy when a new instance starts while one is running (`TASK_INSTANCES_POLICY`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstancesPolicy {
    Parallel = 0,
    Queue = 1,
    IgnoreNew = 2,
    StopExisting = 3,
}

impl InstancesPolicy {
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::Parallel,
            1 => Self::Queue,
            2 => Self::IgnoreNew,
            3 => Self::StopExisting,
            _ => return None,
        })
    }
}

/// Compatibility level of a task definition (`TASK_COMPATIBILITY`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskCompatibility {
    At = 0,
    V1 = 1,
    V2 = 2,
    V2_1 = 3,
    V2_2 = 4,
    V2_3 = 5,
    V2_4 = 6,
}

impl TaskCompatibility {
    pub fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::At,
            1 => Self::V1,
            2 => Self::V2,
            3 => Self::V2_1,
            4 => Self::V2_2,
            5 => Self::V2_3,
            6 => Self::V2_4,
            _ => return None,
        })
    }
}

/// `IRegisteredTask::RunEx` flags (`TASK_RUN_*`).
pub const TASK_RUN_NO_FLAGS: i32 = 0x0;
pub const TASK_RUN_AS_SELF: i32 = 0x1;
pub const TASK_RUN_IGNORE_CONSTRAINTS: i32 = 0x2;

/// `GetTasks` flag including hidden tasks.
pub const TASK_ENUM_HIDDEN: i32 = 0x1;

/// `HRESULT_FROM_WIN32(ERROR_FILE_NOT_FOUND)`, returned for missing folders and tasks.
pub const SCHED_E_NOT_FOUND: i32 = 0x8007_0002_u32 as i32;

/// `HRESULT_FROM_WIN32(ERROR_ALREADY_EXISTS)`, returned by `CreateFolder`.
pub const SCHED_E_ALREADY_EXISTS: i32 = 0x8007_00B7_u32 as i32;
