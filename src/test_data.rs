#[cfg(test)]
pub const CONTENT_INDEX_TOML: &str = r##"
[[post]]
title = "Widgets, part 1"
date = "2024-01-01 09:00:00"
permalink = "/posts/widgets-1/"
series = ["Widgets"]
series_index = 1
tags = ["rust", "widgets"]
description = "Where we build the <em>first</em> widget and learn why widgets matter at all."

[[post]]
title = "Widgets, part 3"
date = "2024-03-01T09:00:00Z"
permalink = "/posts/widgets-3/"
series = ["Widgets"]
series_index = 3
tags = ["rust", "widgets"]

[[post]]
title = "Widgets, part 2"
date = "2024-02-01"
permalink = "/posts/widgets-2/"
series = "Widgets"
series_index = 2
tags = ["rust"]
description = "Second widget."

[[post]]
title = "Hello world"
date = "2023-12-01 08:30:00.000"
permalink = "/posts/hello/"
tags = ["meta"]
description = "First post of the blog."

[[post]]
title = "Broken date"
date = "2024-02-30"
permalink = "/posts/broken/"

[[post]]
title = "Widgets, part 4"
date = "2024-04-01"
permalink = "/posts/widgets-4/"
series = ["Widgets"]
series_index = 4
draft = true

[[post]]
title = "Hello again"
date = "2023-12-02"
permalink = "/posts/hello/"
"##;

#[cfg(test)]
pub const CONTENT_INDEX_JSON: &str = r##"{
  "post": [
    {
      "title": "Hello world",
      "date": "2023-12-01",
      "permalink": "/posts/hello/",
      "tags": ["meta"]
    },
    {
      "title": "Gadgets, part 1",
      "date": "2024-05-01T10:00:00+02:00",
      "permalink": "/posts/gadgets-1/",
      "series": "Gadgets",
      "series_index": 1
    }
  ]
}"##;

#[cfg(test)]
pub const CONFIG_TOML: &str = r##"
[site]
title = "Thiago Cafe"
base_url = "https://thiagocafe.com"
description = "Programming and other technological things"

[paths]
content_index = "${config_dir}/content.toml"

[defaults]
page_size = 2
summary_length = 40
home_series_count = 5
"##;
