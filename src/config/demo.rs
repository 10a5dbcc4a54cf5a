//! Fixed demonstration run when the CLI is started without `--scenario`.

use crate::config::toml_config::ScenarioConfig;
use crate::utils::error::Result;

pub const DEMO_SCENARIOS: &str = r#"
[policy]
max_credits = 24

[[catalog]]
code = "CS101"
title = "Algorithms"
credits = 3
day = "Mon"
start = "10:00"
end = "12:00"

[[catalog]]
code = "CS201"
title = "Data Structures"
credits = 3
day = "Tue"
start = "10:00"
end = "12:00"
prerequisites = ["CS101"]

[[catalog]]
code = "CS301"
title = "Advanced Algorithms"
credits = 3
day = "Mon"
start = "08:00"
end = "10:00"
prerequisites = ["CS101", "CS201"]

[[catalog]]
code = "CS350"
title = "Software Engineering Project"
credits = 6
day = "Fri"
start = "13:00"
end = "15:00"
prerequisites = ["CS201"]

[[catalog]]
code = "MA201"
title = "Linear Algebra"
credits = 4
day = "Mon"
start = "08:00"
end = "10:00"

[[catalog]]
code = "PH101"
title = "Physics I"
credits = 4
day = "Tue"
start = "08:00"
end = "10:00"

[[catalog]]
code = "EN101"
title = "Academic English"
credits = 2
day = "Wed"
start = "08:00"
end = "10:00"

[[catalog]]
code = "CS110"
title = "Programming Fundamentals"
credits = 4
day = "Thu"
start = "08:00"
end = "10:00"

[[catalog]]
code = "ST101"
title = "Statistics"
credits = 3
day = "Fri"
start = "08:00"
end = "10:00"

[[catalog]]
code = "MA102"
title = "Calculus II"
credits = 3
day = "Wed"
start = "10:00"
end = "12:00"

[[catalog]]
code = "HI101"
title = "World History"
credits = 2
day = "Mon"
start = "08:00"
end = "10:00"

[[scenarios]]
name = "missing-prerequisite-and-clash"
student = "S-001"
completed = ["CS101"]
enrolled = ["MA201", "PH101", "EN101", "CS110", "ST101", "MA102"]
requested = ["CS301"]

[[scenarios]]
name = "credit-overload"
student = "S-002"
completed = ["CS101", "CS201"]
enrolled = ["MA201", "PH101", "EN101", "CS110", "ST101", "MA102"]
requested = ["CS350"]

[[scenarios]]
name = "same-slot-requests"
student = "S-003"
completed = ["CS101", "CS201"]
requested = ["CS301", "HI101"]

[[scenarios]]
name = "clean-registration"
student = "S-004"
completed = ["CS101"]
enrolled = ["PH101"]
requested = ["CS201", "EN101"]
"#;

pub fn demo_config() -> Result<ScenarioConfig> {
    ScenarioConfig::from_toml_str(DEMO_SCENARIOS)
}
